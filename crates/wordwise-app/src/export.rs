use std::io;

use wordwise_core::mastery;
use wordwise_types::VocabularyEntry;

const HEADER: [&str; 12] = [
    "Word",
    "Part of Speech",
    "Definition",
    "Difficulty",
    "Lookups",
    "Mastery%",
    "Favorite",
    "Learned",
    "Etymology",
    "First Lookup",
    "Synonyms",
    "Antonyms",
];

/// Vocabulary as CSV, one row per entry in the given order
pub fn to_csv(entries: &[VocabularyEntry]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for entry in entries {
        writer.write_record([
            entry.word.clone(),
            entry.part_of_speech.clone(),
            entry.definition.clone(),
            entry.difficulty.to_string(),
            entry.lookup_count.to_string(),
            mastery::score(entry).to_string(),
            yes_no(entry.favorite).to_string(),
            yes_no(entry.learned).to_string(),
            entry.etymology.clone().unwrap_or_default(),
            entry.first_seen.format("%Y-%m-%d").to_string(),
            entry.synonyms.join(", "),
            entry.antonyms.join(", "),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;

    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}
