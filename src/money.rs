/// Format an amount using Indian-system digit grouping: the last three
/// digits form one group, every group above that has two digits.
/// Up to two decimal places are kept, trailing zeroes dropped.
pub fn format_inr(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as i64;
    let whole = cents / 100;
    let frac = cents % 100;

    let mut out = group_digits(whole);
    if frac != 0 {
        if frac % 10 == 0 {
            out.push_str(&format!(".{}", frac / 10));
        } else {
            out.push_str(&format!(".{frac:02}"));
        }
    }
    if negative && cents != 0 {
        out.insert(0, '-');
    }
    out
}

/// `format_inr` with the rupee symbol prefixed.
pub fn rupees(amount: f64) -> String {
    format!("₹{}", format_inr(amount))
}

fn group_digits(value: i64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut idx = head.len();
    while idx > 2 {
        groups.push(&head[idx - 2..idx]);
        idx -= 2;
    }
    groups.push(&head[..idx]);

    let mut out = String::new();
    for part in groups.iter().rev() {
        out.push_str(part);
        out.push(',');
    }
    out.push_str(tail);
    out
}
