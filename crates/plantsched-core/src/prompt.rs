//! Instruction prompts for plant schedule extraction.
//!
//! Two variants of the same operation: a detailed prompt that walks the model
//! through the common schedule layouts (multi-page drawing sets), and a
//! compact one with a smaller output-token budget for simple single-table
//! documents. Both target the same model and endpoint.

use std::str::FromStr;

/// The closed category vocabulary the prompt confines the model to.
pub const CATEGORIES: [&str; 5] = ["tree", "palm", "shrub", "grass", "groundcover"];

const DETAILED_PROMPT: &str = r#"You are an expert at reading landscape architectural plant schedules from construction plans and PDFs.

Extract ALL plants from this document. Carefully examine every page — plant schedules may span multiple pages and can appear as tables, lists, or within plan notes.

Common plant schedule formats:
- Tables with columns: Symbol/Code, Botanical Name, Common Name, Size/Spec, Quantity
- Sometimes columns are: Key, Plant, Description, Container/Cal, Spacing, Qty
- The table may have a "Remarks" or "Notes" column — ignore that column
- Quantities may appear as totals at the end of a row or in a dedicated "Qty" column
- Size specs may include: caliper (e.g. 4" Cal), height (e.g. 14' HT), gallon size (e.g. 30 Gal), spread, spacing
- Some schedules split trees, shrubs, groundcover, and grasses into separate sections

Rules:
- Include EVERY plant row, even if some fields are missing
- For botanical names, use proper Latin format (genus species 'Cultivar') — do NOT include size info in the botanical field
- Combine all size/specification info into the "spec" field (caliper, height, gallon, spread, container, B&B, etc.)
- If a plant appears in multiple rows with different sizes, include each as a separate entry
- Qty must be a number. If it says "As Shown" or is blank, use 0
- Categorize based on the plant type or the section header it appears under

Return ONLY a valid JSON array. No markdown, no code fences, no explanation. Just the raw JSON array.

Each object must have exactly these fields:
{"code":"QV","botanical":"Quercus virginiana","common":"Live Oak","spec":"4\" Cal, 14' HT, 8' Spr","qty":5,"category":"tree"}

category must be one of: "tree", "palm", "shrub", "grass", "groundcover""#;

const COMPACT_PROMPT: &str = r#"Extract every plant from the plant schedule in this document.

Return ONLY a raw JSON array, no markdown or explanation. Each object must have exactly these fields:
{"code":"QV","botanical":"Quercus virginiana","common":"Live Oak","spec":"4\" Cal, 14' HT, 8' Spr","qty":5,"category":"tree"}

Combine all size info into "spec". Qty must be a number (0 if blank or "As Shown"). category must be one of: "tree", "palm", "shrub", "grass", "groundcover""#;

/// Which instruction prompt to send with the PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptVariant {
    #[default]
    Detailed,
    Compact,
}

impl PromptVariant {
    /// The instruction text attached after the PDF document block.
    pub fn instruction(&self) -> &'static str {
        match self {
            PromptVariant::Detailed => DETAILED_PROMPT,
            PromptVariant::Compact => COMPACT_PROMPT,
        }
    }

    /// Output-token budget for the upstream request.
    pub fn max_tokens(&self) -> u32 {
        match self {
            PromptVariant::Detailed => 16384,
            PromptVariant::Compact => 8192,
        }
    }
}

impl FromStr for PromptVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "detailed" => Ok(PromptVariant::Detailed),
            "compact" => Ok(PromptVariant::Compact),
            other => Err(format!(
                "unknown prompt variant '{}' (expected 'detailed' or 'compact')",
                other
            )),
        }
    }
}
