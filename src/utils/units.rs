/// Split a display name like "Max Wind Kts" into its field and unit suffix.
///
/// Single-letter units are upper-cased and attach directly to the number
/// ("90.00F"); longer ones are lower-cased behind a space ("12.00 kts").
pub fn split_units(display_name: &str, lower: bool) -> (String, String) {
    let mut words: Vec<&str> = display_name.split_whitespace().collect();
    let unit = words.pop().unwrap_or_default();
    let unit = if unit.chars().count() == 1 {
        unit.to_uppercase()
    } else {
        format!(" {}", unit.to_lowercase())
    };
    let field = words.join(" ");
    let field = if lower { field.to_lowercase() } else { field };
    (field, unit)
}

/// `value` with two decimals and its unit suffix.
pub fn format_value(value: f64, unit: &str) -> String {
    format!("{:.2}{}", value, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letter_unit() {
        assert_eq!(
            split_units("Max Temp F", false),
            ("Max Temp".to_string(), "F".to_string())
        );
        assert_eq!(format_value(90.0, "F"), "90.00F");
    }

    #[test]
    fn test_word_unit() {
        assert_eq!(
            split_units("Max Wind Kts", true),
            ("max wind".to_string(), " kts".to_string())
        );
        assert_eq!(format_value(0.5, " in"), "0.50 in");
    }
}
