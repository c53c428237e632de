//! Display helpers shared by advice text, exports and the CLI.

/// `$1234.50`, or `-$12.00` for negative amounts.
pub fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}
