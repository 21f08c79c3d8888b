use anyhow::{Context, Result};
use clap::Parser;
use gptdoc::document::{BlockKind, FuzzyScores};
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use rand::{Rng, rng};
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;

/// A CLI tool to generate random catalog documents for gptdoc
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory the generated documents are written to
    #[arg(short, long, default_value = "generated")]
    output: PathBuf,

    /// How many documents to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// The minimum number of blocks per document
    #[arg(long, default_value_t = 1)]
    min: usize,

    /// The maximum number of blocks per document
    #[arg(long, default_value_t = 12)]
    max: usize,

    /// Write blocks with a single `texto` key instead of `nome`/`descricao`
    #[arg(long)]
    textual: bool,
}

const NAMES: [&str; 6] = [
    "Assistente de Vendas",
    "Analista de Contratos",
    "Tutor de Matemática",
    "Curador de Notícias",
    "Planejador de Viagens",
    "Revisor de Código",
];

const CATEGORIES: [&str; 4] = ["Educação", "Negócios", "Jurídico", "Tecnologia"];

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rng = rng();

    if cli.min > cli.max {
        anyhow::bail!("--min ({}) cannot be greater than --max ({})", cli.min, cli.max);
    }

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("creating '{}'", cli.output.display()))?;

    println!(
        "Generating {} document(s) with {} to {} blocks each...",
        cli.count, cli.min, cli.max
    );

    for n in 1..=cli.count {
        let block_count = rng.random_range(cli.min..=cli.max);
        let document = generate_document(&mut rng, block_count, cli.textual);

        let path = cli.output.join(format!("gpt_{:03}.json", n));
        let json_output = serde_json::to_string_pretty(&document)?;
        fs::write(&path, json_output).with_context(|| format!("writing '{}'", path.display()))?;
        println!("-> Generated '{}' with {} block(s).", path.display(), block_count);
    }

    Ok(())
}

/// Generates one document whose blocks form a linear flow in document order.
fn generate_document(rng: &mut ThreadRng, block_count: usize, textual: bool) -> Value {
    let blocks: Vec<Value> = (0..block_count)
        .map(|i| generate_block(rng, i, block_count, textual))
        .collect();
    let connections: Vec<Value> = (1..block_count)
        .map(|i| json!([format!("b{}", i), format!("b{}", i + 1)]))
        .collect();

    let mut document = json!({
        "nome_do_gpt": NAMES.choose(rng).copied().unwrap_or("GPT"),
        "categoria": CATEGORIES.choose(rng).copied().unwrap_or("Outros"),
        "blocos_funcionais": blocks,
        "conexoes": connections,
    });
    if textual {
        document["função_principal"] = json!("Documento gerado automaticamente.");
    }
    document
}

fn generate_block(rng: &mut ThreadRng, index: usize, total: usize, textual: bool) -> Value {
    let kind = match index {
        0 => BlockKind::Inicio,
        i if i + 1 == total => BlockKind::Fim,
        _ => *[
            BlockKind::Acao,
            BlockKind::Validacao,
            BlockKind::Output,
            BlockKind::Outros,
        ]
        .choose(rng)
        .unwrap_or(&BlockKind::Acao),
    };

    let fuzzy: FuzzyScores = FuzzyScores::STANDARD_SYMBOLS
        .iter()
        .map(|symbol| (*symbol, round2(rng.random_range(0.0..=1.0))))
        .collect();

    let id = format!("b{}", index + 1);
    let mut block = json!({
        "id": id,
        "tipo": kind.tag(),
        "fuzzy": fuzzy,
        "S(x)": round2(rng.random_range(0.0..=1.0)),
    });
    if textual {
        block["texto"] = json!(format!("Etapa {} do fluxo ({}).", index + 1, kind));
    } else {
        block["nome"] = json!(format!("Etapa {}", index + 1));
        block["descricao"] = json!(format!("Descrição da etapa {} ({}).", index + 1, kind));
    }
    block
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
