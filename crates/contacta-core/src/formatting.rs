//! Number formatting in the Brazilian convention (`1.234`, `12,5%`).

/// Format an integer count with `.` thousands separators.
///
/// # Examples
///
/// ```
/// use contacta_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1234), "1.234");
/// assert_eq!(format_count(1_234_567), "1.234.567");
/// ```
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Format a percentage with a decimal comma and a `%` suffix.
///
/// # Examples
///
/// ```
/// use contacta_core::formatting::format_percent;
///
/// assert_eq!(format_percent(12.5, 1), "12,5%");
/// assert_eq!(format_percent(100.0, 0), "100%");
/// ```
pub fn format_percent(value: f64, decimals: u32) -> String {
    let formatted = format!("{:.prec$}", value, prec = decimals as usize);
    format!("{}%", formatted.replace('.', ","))
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
///
/// # Examples
///
/// ```
/// use contacta_core::formatting::percentage;
///
/// assert!((percentage(50.0, 200.0, 1) - 25.0).abs() < 1e-9);
/// assert_eq!(percentage(0.0, 0.0, 2), 0.0);
/// ```
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let raw = (part / whole) * 100.0;
    let factor = 10_f64.powi(decimal_places as i32);
    (raw * factor).round() / factor
}

/// Insert dots every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push('.');
        }
        result.push(c);
    }
    result
}
