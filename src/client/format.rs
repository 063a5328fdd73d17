//! Display formatting for prices and distances

/// Price in lakhs, e.g. `₹10.50L`
pub fn lakhs(price: f64) -> String {
    format!("₹{:.2}L", price)
}

/// Odometer reading with thousands separators, e.g. `27,000 km`
pub fn kilometres(kms: u64) -> String {
    format!("{} km", group_thousands(kms))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
