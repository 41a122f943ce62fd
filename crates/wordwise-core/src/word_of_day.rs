use chrono::{Datelike, NaiveDate};

pub const WORD_OF_DAY_POOL: [&str; 65] = [
    "serendipity", "ephemeral", "quintessential", "ubiquitous", "eloquent",
    "resilient", "enigma", "paradigm", "aesthetic", "altruistic",
    "cacophony", "diligent", "ebullient", "fortuitous", "gregarious",
    "harbinger", "idiosyncratic", "juxtapose", "kinetic", "luminous",
    "melancholy", "nonchalant", "omniscient", "perspicacious", "quixotic",
    "sagacious", "tenacious", "voracious", "whimsical", "zealous",
    "abstruse", "benevolent", "conundrum", "discernment", "effervescent",
    "fastidious", "gratuitous", "hyperbole", "impetuous", "judicious",
    "kaleidoscope", "labyrinthine", "magnanimous", "nebulous", "ostentatious",
    "panacea", "recalcitrant", "surreptitious", "trepidation", "unequivocal",
    "vicissitude", "wanderlust", "xenial", "yearning", "zenith",
    "ambivalent", "bombastic", "circumspect", "debonair", "esoteric",
    "flamboyant", "garrulous", "hapless", "ineffable", "juxtaposition",
];

/// Word featured on `date`, indexed by year + month + day
pub fn word_of_day(date: NaiveDate) -> &'static str {
    let index = (date.year().unsigned_abs() + date.month() + date.day()) as usize;
    WORD_OF_DAY_POOL[index % WORD_OF_DAY_POOL.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_of_day_is_stable_per_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        // 2024 + 6 + 15 = 2045, 2045 % 65 = 30
        assert_eq!(word_of_day(date), "abstruse");
        assert_eq!(word_of_day(date), word_of_day(date));
    }
}
