use super::ColorCapability;
use crate::cli::ColorArg;

pub(super) fn detect_color_capability_from(
    mode: ColorArg,
    term: Option<&str>,
    colorterm: Option<&str>,
    no_color: Option<&str>,
) -> ColorCapability {
    if should_force_basic16(mode, term, no_color) {
        return ColorCapability::Basic16;
    }
    if supports_truecolor(colorterm, term) {
        return ColorCapability::TrueColor;
    }
    if mode == ColorArg::Always || term.unwrap_or_default().to_lowercase().contains("256color") {
        ColorCapability::Xterm256
    } else {
        ColorCapability::Basic16
    }
}

fn should_force_basic16(mode: ColorArg, term: Option<&str>, no_color: Option<&str>) -> bool {
    match mode {
        ColorArg::Never => true,
        ColorArg::Always => false,
        ColorArg::Auto => {
            no_color.is_some_and(|value| !value.is_empty())
                || term.is_some_and(|value| value.eq_ignore_ascii_case("dumb"))
        }
    }
}

fn supports_truecolor(colorterm: Option<&str>, term: Option<&str>) -> bool {
    [colorterm, term].into_iter().flatten().any(|value| {
        let value = value.to_lowercase();
        value.contains("truecolor") || value.contains("24bit") || value.ends_with("direct")
    })
}
