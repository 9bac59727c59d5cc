use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::error::SeedError;
use crate::store::LeafNode;

/// Placeholder reference for folders whose drive link has not been filled in.
pub const DRIVE_PLACEHOLDER: &str = "PASTE_YOUR_GOOGLE_DRIVE_LINK_HERE";

/// Initial folder table, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    pub folders: Vec<SeedFolder>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedFolder {
    pub name: String,
    pub subfolders: Vec<LeafNode>,
}

#[derive(Deserialize)]
struct FolderBody {
    #[serde(default)]
    subfolders: Vec<LeafNode>,
}

impl Seed {
    /// Parse the JSON seed format:
    /// `{ "<folder>": { "subfolders": [ { "name": .., "url": .. } ] } }`.
    /// Object key order is the display order.
    pub fn from_json(text: &str) -> Result<Self, SeedError> {
        let value: Value = serde_json::from_str(text)?;
        let map = match value {
            Value::Object(map) => map,
            Value::Array(_) => return Err(SeedError::Shape("an array")),
            Value::String(_) => return Err(SeedError::Shape("a string")),
            Value::Number(_) => return Err(SeedError::Shape("a number")),
            Value::Bool(_) => return Err(SeedError::Shape("a boolean")),
            Value::Null => return Err(SeedError::Shape("null")),
        };

        let mut folders = Vec::with_capacity(map.len());
        for (name, body) in map {
            let body: FolderBody = serde_json::from_value(body)?;
            let mut seen: Vec<&str> = Vec::with_capacity(body.subfolders.len());
            for leaf in &body.subfolders {
                if seen.contains(&leaf.name.as_str()) {
                    return Err(SeedError::Duplicate {
                        parent: name.clone(),
                        name: leaf.name.clone(),
                    });
                }
                seen.push(&leaf.name);
            }
            folders.push(SeedFolder {
                name,
                subfolders: body.subfolders,
            });
        }
        Ok(Self { folders })
    }

    /// Read and parse a seed file.
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let text = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Serialize back to the seed format, pretty-printed.
    pub fn to_json_pretty(&self) -> Result<String, SeedError> {
        let mut map = Map::new();
        for folder in &self.folders {
            map.insert(folder.name.clone(), json!({ "subfolders": folder.subfolders }));
        }
        Ok(serde_json::to_string_pretty(&Value::Object(map))?)
    }

    /// The folder table shipped with the application.
    pub fn builtin() -> Self {
        let drive = |id: &str, usp: &str| {
            format!("https://drive.google.com/drive/folders/{id}?usp={usp}")
        };

        let mut folders = vec![
            SeedFolder {
                name: "NDA & NA".to_string(),
                subfolders: vec![
                    LeafNode::new(
                        "Maths PYQ",
                        drive("1EPEqZbooXpgBCQHZ29NfxlJAT0gFjbmP", "sharing"),
                    ),
                    LeafNode::new(
                        "GAT PYQ",
                        drive("1ESNYKlSkYBIFZeOc1N-sB1072JxbGKBB", "sharing"),
                    ),
                    LeafNode::new(
                        "Current Affairs",
                        drive("1ETyWZW66zWdfc_csERtZM5qDGJYIWvaB", "drive_link"),
                    ),
                ],
            },
            SeedFolder {
                name: "CDS".to_string(),
                subfolders: vec![
                    LeafNode::new("English PYQ", DRIVE_PLACEHOLDER),
                    LeafNode::new("GK PYQ", DRIVE_PLACEHOLDER),
                    LeafNode::new("Maths PYQ", DRIVE_PLACEHOLDER),
                ],
            },
        ];

        let unlinked: [(&str, [&str; 3]); 10] = [
            ("AFCAT", ["General Awareness", "Verbal Ability", "Numerical Ability"]),
            ("CAPF", ["Paper I", "Paper II", "Essays"]),
            ("SSC-CHSL", ["Tier I", "Tier II", "Typing Material"]),
            ("SSC-MTS", ["Reasoning", "Numerical Ability", "General Awareness"]),
            ("SSC-JE", ["Civil", "Mechanical", "Electrical"]),
            ("SSC-CGL", ["Tier I", "Tier II", "Syllabus"]),
            ("NEET", ["Physics", "Chemistry", "Biology"]),
            ("JEE", ["Mains", "Advanced", "Formula Sheets"]),
            ("BANKING", ["IBPS PO", "SBI Clerk", "RBI Assistant"]),
            ("RAILWAYS", ["NTPC", "Group D", "ALP"]),
        ];
        folders.extend(unlinked.iter().map(|(name, leaves)| SeedFolder {
            name: name.to_string(),
            subfolders: leaves.iter().map(|l| LeafNode::new(*l, "#")).collect(),
        }));

        Self { folders }
    }
}
