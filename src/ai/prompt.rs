//! Constrained prompt construction and answer validation.

use std::fmt::Write;

use crate::{
    catalog::{AssetId, Catalog},
    classify::ClassificationInput,
};

const PHRASE_HINTS_PER_ASSET: usize = 6;

/// Build the constrained routing prompt for one input.
pub fn build_prompt(input: &ClassificationInput, catalog: &Catalog) -> String {
    let mut prompt = String::from(
        "You route clinical summaries to exactly one body-system visualization.\n\n\
         ALLOWED ANSWERS (reply with one token from this list and nothing else):\n",
    );
    for asset in AssetId::ALL {
        let _ = writeln!(prompt, "- {asset}");
    }

    prompt.push_str(
        "\nPRIORITY RULES:\n\
         1. Diagnoses outrank the free-text summary.\n\
         2. Organ or system terms outrank body-region pain phrases.\n\
         3. Hand, wrist, finger or arm pain is region_hand; leg, knee, ankle, foot or thigh pain is region_leg.\n",
    );
    let _ = writeln!(
        prompt,
        "4. Chest pain or discomfort is {} unless clearly respiratory; exertional pain is {}.",
        catalog.cardiac(),
        catalog.cardiac()
    );
    let _ = writeln!(
        prompt,
        "5. Abdominal pain without a stomach or bowel indicator, or any doubt, is {}.",
        catalog.fallback()
    );

    prompt.push_str("\nKEYWORD HINTS:\n");
    for (asset, phrases) in catalog.phrases_by_asset() {
        let sample = phrases
            .iter()
            .take(PHRASE_HINTS_PER_ASSET)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(prompt, "- {asset}: {sample}");
    }

    prompt.push_str("\nDIAGNOSES:\n");
    for diagnosis in input.diagnoses() {
        let _ = writeln!(prompt, "- {}", diagnosis.trim());
    }
    let _ = write!(
        prompt,
        "\nSUMMARY:\n{}\n\nANSWER:",
        input.summary().trim()
    );
    prompt
}

/// Map a free-form model reply onto an allowed token.
///
/// The first non-empty line is folded (lower-case, separators to `_`,
/// quotes and punctuation stripped) and accepted when it contains an allowed
/// token or an allowed token contains it. Longer tokens are tried first.
pub fn parse_answer(raw: &str) -> Option<AssetId> {
    let line = raw.lines().map(str::trim).find(|line| !line.is_empty())?;
    let answer: String = line
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            'a'..='z' | '0'..='9' | '_' => Some(c),
            ' ' | '-' | '\t' => Some('_'),
            _ => None,
        })
        .collect();
    let answer = answer.trim_matches('_');
    if answer.len() < 3 {
        return None;
    }

    let mut tokens = AssetId::ALL.to_vec();
    tokens.sort_by_key(|asset| std::cmp::Reverse(asset.as_str().len()));
    tokens.into_iter().find(|asset| {
        let token = asset.as_str();
        answer.contains(token) || token.contains(answer)
    })
}
