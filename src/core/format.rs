/// Turns chart values into display strings for cards and annotations.
pub trait CurrencyFormatter {
    /// Amount with the currency marker, e.g. `1.200.000 kr.`.
    fn currency(&self, value: f64) -> String;
    /// Amount grouped but without a currency marker.
    fn decimal(&self, value: f64) -> String;
}

/// da-DK conventions: whole kroner, `.` as thousands separator.
#[derive(Debug, Clone, Copy, Default)]
pub struct DanishKrone;

impl CurrencyFormatter for DanishKrone {
    fn currency(&self, value: f64) -> String {
        if !value.is_finite() {
            return "-".to_string();
        }
        format!("{} kr.", group_thousands(value, '.'))
    }

    fn decimal(&self, value: f64) -> String {
        if !value.is_finite() {
            return "-".to_string();
        }
        group_thousands(value, '.')
    }
}

fn group_thousands(value: f64, separator: char) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands_with_periods() {
        let fmt = DanishKrone;
        assert_eq!(fmt.currency(1_200_000.0), "1.200.000 kr.");
        assert_eq!(fmt.currency(547_850.0), "547.850 kr.");
        assert_eq!(fmt.currency(37_809_798.0), "37.809.798 kr.");
        assert_eq!(fmt.currency(999.0), "999 kr.");
        assert_eq!(fmt.currency(0.0), "0 kr.");
    }

    #[test]
    fn values_are_rounded_to_whole_kroner() {
        let fmt = DanishKrone;
        assert_eq!(fmt.decimal(2_631_910.607), "2.631.911");
        assert_eq!(fmt.decimal(1_499.4), "1.499");
        assert_eq!(fmt.decimal(-0.4), "0");
    }

    #[test]
    fn negative_amounts_keep_sign_before_grouping() {
        let fmt = DanishKrone;
        assert_eq!(fmt.currency(-16_707_150.0), "-16.707.150 kr.");
        assert_eq!(fmt.decimal(-1_000.0), "-1.000");
    }

    #[test]
    fn non_finite_values_render_as_dash() {
        let fmt = DanishKrone;
        assert_eq!(fmt.currency(f64::NAN), "-");
        assert_eq!(fmt.decimal(f64::INFINITY), "-");
    }
}
