use is_terminal::IsTerminal;

/// Whether stdout should get ANSI colors
pub fn stdout_supports_color() -> bool {
    supports_color_impl(
        |key| std::env::var(key).ok(),
        std::io::stdout().is_terminal(),
    )
}

fn supports_color_impl(get_env: impl Fn(&str) -> Option<String>, is_tty: bool) -> bool {
    let term = get_env("TERM").unwrap_or_default();
    let term_is_dumb = term.eq_ignore_ascii_case("dumb");
    let no_color = get_env("NO_COLOR").is_some();
    is_tty && !term_is_dumb && !no_color
}
