use std::fmt;

/// The display category of a functional block.
///
/// Only presentation depends on it; no pipeline behavior branches on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Inicio,
    Acao,
    Output,
    Validacao,
    Fim,
    Outros,
}

/// Presentation attributes for a block kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayHint {
    pub css_class: &'static str,
    pub color: &'static str,
}

impl BlockKind {
    pub const ALL: [BlockKind; 6] = [
        BlockKind::Inicio,
        BlockKind::Acao,
        BlockKind::Output,
        BlockKind::Validacao,
        BlockKind::Fim,
        BlockKind::Outros,
    ];

    /// Maps a free-form `tipo` tag onto a kind. Unrecognized tags map to `Outros`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "inicio" | "início" => BlockKind::Inicio,
            "ação" | "acao" => BlockKind::Acao,
            "output" => BlockKind::Output,
            "validação" | "validacao" => BlockKind::Validacao,
            "fim" => BlockKind::Fim,
            _ => BlockKind::Outros,
        }
    }

    /// The canonical tag for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            BlockKind::Inicio => "inicio",
            BlockKind::Acao => "ação",
            BlockKind::Output => "output",
            BlockKind::Validacao => "validação",
            BlockKind::Fim => "fim",
            BlockKind::Outros => "outros",
        }
    }

    pub fn display_hint(self) -> DisplayHint {
        match self {
            BlockKind::Inicio => DisplayHint {
                css_class: "block-inicio",
                color: "#2e7d32",
            },
            BlockKind::Acao => DisplayHint {
                css_class: "block-acao",
                color: "#1565c0",
            },
            BlockKind::Output => DisplayHint {
                css_class: "block-output",
                color: "#6a1b9a",
            },
            BlockKind::Validacao => DisplayHint {
                css_class: "block-validacao",
                color: "#ef6c00",
            },
            BlockKind::Fim => DisplayHint {
                css_class: "block-fim",
                color: "#c62828",
            },
            BlockKind::Outros => DisplayHint {
                css_class: "block-outros",
                color: "#546e7a",
            },
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
