use crate::document::{CatalogDocument, FunctionalBlock};
use crate::metrics::Metrics;
use ahash::AHashMap;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const STYLE: &str = "\
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 960px; color: #222; }
header { display: flex; align-items: center; gap: 1rem; border-bottom: 2px solid #ddd; }
header img { max-height: 64px; }
.meta { color: #555; margin: 0.2rem 0; }
.block { border-left: 6px solid #546e7a; background: #fafafa; padding: 0.5rem 1rem; margin: 1rem 0; }
.block h3 { margin: 0.3rem 0; }
.tag { font-weight: normal; color: #666; }
table { border-collapse: collapse; margin: 0.5rem 0; }
th, td { border: 1px solid #ccc; padding: 0.2rem 0.6rem; text-align: center; }
.missing { color: #c62828; }
";

/// Builds a self-contained HTML report of a catalog document.
///
/// The page uses inline styles only. Blocks appear in document order, and the
/// connections are listed as explicit edges in connection order.
pub struct HtmlReport<'a> {
    doc: &'a CatalogDocument,
    metrics: Option<&'a Metrics>,
    logo: Option<String>,
}

impl<'a> HtmlReport<'a> {
    pub fn new(doc: &'a CatalogDocument) -> Self {
        Self {
            doc,
            metrics: None,
            logo: None,
        }
    }

    /// Adds a section with the document's averages.
    pub fn with_metrics(mut self, metrics: &'a Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Embeds an image in the header as a base64 `data:` URI.
    pub fn with_logo(mut self, bytes: &[u8], mime: &str) -> Self {
        self.logo = Some(format!(
            "data:{};base64,{}",
            escape(mime),
            STANDARD.encode(bytes)
        ));
        self
    }

    pub fn render(&self) -> String {
        let doc = self.doc;
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape(&doc.name)));
        html.push_str(&format!("<style>\n{}</style>\n</head>\n<body>\n", STYLE));

        html.push_str("<header>\n");
        if let Some(src) = &self.logo {
            html.push_str(&format!("<img src=\"{}\" alt=\"logo\">\n", src));
        }
        html.push_str(&format!("<div>\n<h1>{}</h1>\n", escape(&doc.name)));
        html.push_str(&format!(
            "<p class=\"meta\">Categoria: {}</p>\n",
            escape(&doc.category)
        ));
        if let Some(main_function) = &doc.main_function {
            html.push_str(&format!(
                "<p class=\"meta\">Função principal: {}</p>\n",
                escape(main_function)
            ));
        }
        html.push_str("</div>\n</header>\n");

        if let Some(metrics) = self.metrics {
            html.push_str(&Self::render_metrics(metrics));
        }

        html.push_str("<section class=\"blocks\">\n<h2>Blocos Funcionais</h2>\n");
        for block in &doc.blocks {
            html.push_str(&Self::render_block(block));
        }
        html.push_str("</section>\n");

        html.push_str(&self.render_connections());
        html.push_str("</body>\n</html>\n");
        html
    }

    fn render_metrics(metrics: &Metrics) -> String {
        let mut section = String::from("<section class=\"metrics\">\n<h2>Médias</h2>\n<table>\n");
        section.push_str(&format!(
            "<tr><th>S(x)</th><td>{:.2}</td></tr>\n",
            metrics.average_membership
        ));
        for (symbol, value) in &metrics.average_fuzzy {
            section.push_str(&format!(
                "<tr><th>{}</th><td>{:.2}</td></tr>\n",
                escape(symbol),
                value
            ));
        }
        section.push_str("</table>\n</section>\n");
        section
    }

    fn render_block(block: &FunctionalBlock) -> String {
        let hint = block.kind().display_hint();
        let mut article = format!(
            "<article class=\"block {}\" style=\"border-left-color: {}\">\n",
            hint.css_class, hint.color
        );
        article.push_str(&format!(
            "<h3>{} | {} <span class=\"tag\">({})</span></h3>\n",
            escape(&block.id),
            escape(&block.name),
            escape(&block.kind_tag)
        ));
        article.push_str(&format!("<p>{}</p>\n", escape(&block.description)));

        if !block.fuzzy.is_empty() {
            let (header, cells): (String, String) = block
                .fuzzy
                .iter()
                .map(|(symbol, value)| {
                    (
                        format!("<th>{}</th>", escape(symbol)),
                        format!("<td>{:.2}</td>", value),
                    )
                })
                .unzip();
            article.push_str(&format!(
                "<table class=\"fuzzy\">\n<tr>{}</tr>\n<tr>{}</tr>\n</table>\n",
                header, cells
            ));
        }

        article.push_str(&format!(
            "<p class=\"membership\">S(x): <code>{:.2}</code></p>\n</article>\n",
            block.membership
        ));
        article
    }

    fn render_connections(&self) -> String {
        let mut section = String::from("<section class=\"connections\">\n<h2>Conexões</h2>\n");
        if self.doc.connections.is_empty() {
            section.push_str("<p>Nenhuma conexão.</p>\n</section>\n");
            return section;
        }

        let mut by_id: AHashMap<&str, &FunctionalBlock> = AHashMap::new();
        for block in &self.doc.blocks {
            by_id.entry(block.id.as_str()).or_insert(block);
        }
        let endpoint = |id: &str| match by_id.get(id) {
            Some(block) => format!("{} (<code>{}</code>)", escape(&block.name), escape(id)),
            None => format!(
                "<code>{}</code> <span class=\"missing\">(ausente)</span>",
                escape(id)
            ),
        };

        section.push_str("<ol>\n");
        for connection in &self.doc.connections {
            section.push_str(&format!(
                "<li>{} &rarr; {}</li>\n",
                endpoint(&connection.source),
                endpoint(&connection.target)
            ));
        }
        section.push_str("</ol>\n</section>\n");
        section
    }
}

/// Renders the bare report: blocks and connections, no averages and no logo.
pub fn to_export_html(doc: &CatalogDocument) -> String {
    HtmlReport::new(doc).render()
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
