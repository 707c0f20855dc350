use std::{borrow::Cow, fmt, time::Duration};

/// A swap specification for `HX-Reswap` (or a location's `swap` property).
///
/// Start from one of the base strategies and chain modifiers onto it. Every
/// modifier returns a new value with ` key:value` appended; modifiers are
/// neither validated nor de-duplicated.
///
/// ```
/// use std::time::Duration;
/// use htmx_headers::Reswap;
///
/// let swap = Reswap::INNER_HTML.transition().settle(Duration::from_secs(1));
/// assert_eq!(swap.as_str(), "innerHTML transition:true settle:1s");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Reswap(Cow<'static, str>);

impl Reswap {
    pub const INNER_HTML: Reswap = Reswap(Cow::Borrowed("innerHTML"));
    pub const OUTER_HTML: Reswap = Reswap(Cow::Borrowed("outerHTML"));
    pub const BEFORE_BEGIN: Reswap = Reswap(Cow::Borrowed("beforebegin"));
    pub const BEFORE_END: Reswap = Reswap(Cow::Borrowed("beforeend"));
    pub const AFTER_BEGIN: Reswap = Reswap(Cow::Borrowed("afterbegin"));
    pub const AFTER_END: Reswap = Reswap(Cow::Borrowed("afterend"));
    pub const DELETE: Reswap = Reswap(Cow::Borrowed("delete"));
    pub const NONE: Reswap = Reswap(Cow::Borrowed("none"));

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn focus_scroll(&self, focus: bool) -> Reswap {
        self.modifier("focus-scroll", focus)
    }

    pub fn ignore_title(&self) -> Reswap {
        self.modifier("ignoreTitle", true)
    }

    pub fn transition(&self) -> Reswap {
        self.modifier("transition", true)
    }

    /// Delay between the swap and the settle step.
    pub fn settle(&self, delay: Duration) -> Reswap {
        self.modifier("settle", format_duration(delay))
    }

    /// Delay between receiving the response and swapping it in.
    pub fn swap(&self, delay: Duration) -> Reswap {
        self.modifier("swap", format_duration(delay))
    }

    /// `target` is passed through as is, so `"#other:top"` works.
    pub fn show(&self, target: &str) -> Reswap {
        self.modifier("show", target)
    }

    /// `target` is passed through as is, so `"#other:bottom"` works.
    pub fn scroll(&self, target: &str) -> Reswap {
        self.modifier("scroll", target)
    }

    fn modifier(&self, key: &str, value: impl fmt::Display) -> Reswap {
        Reswap(Cow::Owned(format!("{} {key}:{value}", self.0)))
    }
}

impl fmt::Display for Reswap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Reswap {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Reswap {
    fn from(value: &str) -> Self {
        Reswap(Cow::Owned(value.to_string()))
    }
}

impl From<String> for Reswap {
    fn from(value: String) -> Self {
        Reswap(Cow::Owned(value))
    }
}

/// Compact duration text in the style `1h2m3.5s`, `1m30s`, `250ms`.
fn format_duration(d: Duration) -> String {
    const MICRO: u128 = 1_000;
    const MILLI: u128 = 1_000_000;
    const SECOND: u128 = 1_000_000_000;

    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < MICRO {
        return format!("{nanos}ns");
    }
    if nanos < MILLI {
        return format!("{}µs", decimal(nanos, MICRO));
    }
    if nanos < SECOND {
        return format!("{}ms", decimal(nanos, MILLI));
    }

    let secs = d.as_secs();
    let hours = secs / 3600;
    let minutes = secs / 60 % 60;
    let seconds = decimal(
        u128::from(secs % 60) * SECOND + u128::from(d.subsec_nanos()),
        SECOND,
    );

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// `value / unit` with the fraction written out and trailing zeros dropped.
fn decimal(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }

    let width = unit.ilog10() as usize;
    let digits = format!("{frac:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
