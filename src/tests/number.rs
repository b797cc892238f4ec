use crate::number::{format_decimal, format_real, format_scientific, split_scientific};

#[test]
fn test_format_real() {
    assert_eq!(format_real(3.0), "3");
    assert_eq!(format_real(-42.0), "-42");
    assert_eq!(format_real(0.125), "0.125");
    assert_eq!(format_real(1234.5), "1234.5");
    assert_eq!(format_real(123456.5), "1.234565E5");
    assert_eq!(format_real(0.00002), "2E-5");
    assert_eq!(format_real(f64::NAN), "NaN");
    assert_eq!(format_real(f64::INFINITY), "INF");
    assert_eq!(format_real(f64::NEG_INFINITY), "-INF");

    // Integral, but too large for an i32
    assert_eq!(format_real(1e10), "1E10");
}

#[test]
fn test_format_parts() {
    assert_eq!(format_decimal(2.50), "2.5");
    assert_eq!(format_scientific(6.022e23), "6.022E23");

    assert_eq!(split_scientific("6.022E23"), Some(("6.022", "23")));
    assert_eq!(split_scientific("-1E-3"), Some(("-1", "-3")));
    assert_eq!(split_scientific("0.5"), None);
}
