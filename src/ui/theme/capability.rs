use super::{ColorArg, ColorCapability};

pub(super) fn detect_color_capability_from(
    mode: ColorArg,
    term: Option<&str>,
    colorterm: Option<&str>,
    no_color: Option<&str>,
) -> ColorCapability {
    if should_force_basic16(mode, term, no_color) {
        return ColorCapability::Basic16;
    }
    if mode == ColorArg::Always || supports_truecolor(colorterm, term) {
        return ColorCapability::TrueColor;
    }
    if term.is_some_and(|t| t.to_lowercase().contains("256color")) {
        ColorCapability::Xterm256
    } else {
        ColorCapability::Basic16
    }
}

fn should_force_basic16(mode: ColorArg, term: Option<&str>, no_color: Option<&str>) -> bool {
    mode == ColorArg::Never
        || (mode == ColorArg::Auto && no_color.is_some_and(|value| !value.is_empty()))
        || (mode == ColorArg::Auto && term.is_some_and(|value| value.eq_ignore_ascii_case("dumb")))
}

fn supports_truecolor(colorterm: Option<&str>, term: Option<&str>) -> bool {
    [colorterm, term].into_iter().flatten().any(|value| {
        let value = value.to_lowercase();
        value.contains("truecolor") || value.contains("24bit") || value.ends_with("direct")
    })
}
