use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of diagram grammars the pipeline understands.
///
/// The variant order mirrors the detection prefix order; detection itself
/// goes through [`detect_diagram_type`], which is total and never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramType {
    Flowchart,
    Sequence,
    Gantt,
    Class,
    State,
    Pie,
    Er,
    Journey,
    Requirement,
    Git,
    C4,
}

impl DiagramType {
    pub const ALL: [DiagramType; 11] = [
        DiagramType::Flowchart,
        DiagramType::Sequence,
        DiagramType::Gantt,
        DiagramType::Class,
        DiagramType::State,
        DiagramType::Pie,
        DiagramType::Er,
        DiagramType::Journey,
        DiagramType::Requirement,
        DiagramType::Git,
        DiagramType::C4,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramType::Flowchart => "flowchart",
            DiagramType::Sequence => "sequence",
            DiagramType::Gantt => "gantt",
            DiagramType::Class => "class",
            DiagramType::State => "state",
            DiagramType::Pie => "pie",
            DiagramType::Er => "er",
            DiagramType::Journey => "journey",
            DiagramType::Requirement => "requirement",
            DiagramType::Git => "git",
            DiagramType::C4 => "c4",
        }
    }
}

impl fmt::Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// The prefix order is significant: `graph`/`flowchart` must come before the
// rest so `graph TD` never falls through, and `er` intentionally matches any
// source starting with those two letters (literal `starts_with` semantics).
const PREFIXES: [(&str, DiagramType); 12] = [
    ("graph", DiagramType::Flowchart),
    ("flowchart", DiagramType::Flowchart),
    ("sequence", DiagramType::Sequence),
    ("gantt", DiagramType::Gantt),
    ("class", DiagramType::Class),
    ("state", DiagramType::State),
    ("pie", DiagramType::Pie),
    ("er", DiagramType::Er),
    ("journey", DiagramType::Journey),
    ("requirement", DiagramType::Requirement),
    ("git", DiagramType::Git),
    ("c4", DiagramType::C4),
];

/// Classifies diagram source text by its leading keyword.
///
/// Total and deterministic: the first matching prefix of the trimmed,
/// ASCII-lowercased source wins; anything unrecognized (including the empty
/// string) is a flowchart.
pub fn detect_diagram_type(source: &str) -> DiagramType {
    let lowered = source.trim().to_ascii_lowercase();
    for (prefix, diagram_type) in PREFIXES {
        if lowered.starts_with(prefix) {
            return diagram_type;
        }
    }
    DiagramType::Flowchart
}
