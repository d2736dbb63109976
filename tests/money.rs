use masjid_console::money::{format_inr, rupees};

#[test]
fn small_amounts_stay_ungrouped() {
    assert_eq!(format_inr(0.0), "0");
    assert_eq!(format_inr(7.0), "7");
    assert_eq!(format_inr(100.0), "100");
    assert_eq!(format_inr(999.0), "999");
}

#[test]
fn groups_indian_style() {
    assert_eq!(format_inr(1000.0), "1,000");
    assert_eq!(format_inr(123456.0), "1,23,456");
    assert_eq!(format_inr(12345678.0), "1,23,45,678");
    assert_eq!(format_inr(100000.0), "1,00,000");
}

#[test]
fn keeps_up_to_two_decimals() {
    assert_eq!(format_inr(350.5), "350.5");
    assert_eq!(format_inr(99.99), "99.99");
    assert_eq!(format_inr(1234.25), "1,234.25");
    assert_eq!(format_inr(10.0), "10");
}

#[test]
fn negative_amounts_keep_the_sign() {
    assert_eq!(format_inr(-1000.0), "-1,000");
    assert_eq!(format_inr(-0.0), "0");
}

#[test]
fn rupee_prefix() {
    assert_eq!(rupees(123456.0), "₹1,23,456");
}
