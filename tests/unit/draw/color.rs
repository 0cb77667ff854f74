use super::*;

#[test]
fn parses_six_and_eight_digit_hex() {
    assert_eq!(Color::parse_hex("#38bdf8").unwrap(), palette::BLUE);
    assert_eq!(
        Color::parse_hex("A78BFA80").unwrap(),
        palette::PURPLE.with_alpha(0x80)
    );
}

#[test]
fn rejects_malformed_hex() {
    assert!(Color::parse_hex("#123").is_err());
    assert!(Color::parse_hex("#zzzzzz").is_err());
    assert!(Color::parse_hex("#ééé").is_err());
}

#[test]
fn opacity_helpers_clamp() {
    assert_eq!(palette::GREEN.with_opacity(2.0).a, 255);
    assert_eq!(palette::GREEN.with_opacity(-1.0).a, 0);
    assert_eq!(palette::GREEN.with_opacity(f64::NAN).a, 0);
    assert_eq!(palette::GREEN.with_alpha(0x80).fade(0.5).a, 64);
}

#[test]
fn premultiplies_channels() {
    assert_eq!(Color::rgba(255, 128, 0, 128).to_premul(), [128, 64, 0, 128]);
    assert_eq!(Color::TRANSPARENT.to_premul(), [0, 0, 0, 0]);
}
