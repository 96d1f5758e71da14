use super::format::CurrencyFormatter;
use super::growth::series_for;
use super::types::{
    ChartConfig, ChartData, ColorScheme, Dataset, DisparityAnnotation, DisplayMode, FinalValues,
    GrowthModel, LineStyle, Scenario, SummaryCard,
};

pub const HORIZON_YEARS: u32 = 20;
pub const INFLATION_RATE: f64 = 0.04;
pub const MONTHLY_CONTRIBUTION: f64 = 5_000.0;

const LINE_TENSION: f64 = 0.1;
const CONNECTOR_LENGTH_YEARS: f64 = 2.5;

pub const PURCHASING_POWER_ANNOTATION_TEMPLATE: &str = "{amount} difference in purchasing power";
pub const NOMINAL_ANNOTATION_TEMPLATE: &str = "{amount} difference in nominal value";

/// Final balances are precomputed in DKK rather than simulated; the
/// today's-power column is the same balance deflated by 4% a year.
pub static SCENARIOS: [Scenario; 4] = [
    Scenario {
        key: "base",
        annual_rate: 0.0,
        model: GrowthModel::Linear,
        final_values: FinalValues {
            nominal: 1_200_000.0,
            todays_power: 547_850.0,
        },
    },
    Scenario {
        key: "invest7",
        annual_rate: 0.07,
        model: GrowthModel::Compound { rate: 0.07 },
        final_values: FinalValues {
            nominal: 2_459_700.0,
            todays_power: 1_122_500.0,
        },
    },
    Scenario {
        key: "invest20",
        annual_rate: 0.20,
        model: GrowthModel::Compound { rate: 0.20 },
        final_values: FinalValues {
            nominal: 11_201_310.0,
            todays_power: 5_112_000.0,
        },
    },
    Scenario {
        key: "invest30",
        annual_rate: 0.30,
        model: GrowthModel::Compound { rate: 0.30 },
        final_values: FinalValues {
            nominal: 37_809_798.0,
            todays_power: 17_255_000.0,
        },
    },
];

pub const DARK_SCHEME: ColorScheme = ColorScheme {
    lines: [
        LineStyle {
            border_color: "#ef4444",
            background_color: "rgba(239, 68, 68, 0.3)",
            border_dash: Some([5, 5]),
            border_width: 3,
        },
        LineStyle {
            border_color: "#eab308",
            background_color: "rgba(234, 179, 8, 0.5)",
            border_dash: None,
            border_width: 2,
        },
        LineStyle {
            border_color: "#3b82f6",
            background_color: "rgba(59, 130, 246, 0.5)",
            border_dash: None,
            border_width: 2,
        },
        LineStyle {
            border_color: "#22c55e",
            background_color: "rgba(34, 197, 94, 0.5)",
            border_dash: None,
            border_width: 4,
        },
    ],
    annotation_background: "#1877f2",
    annotation_line: "#ffffff",
};

impl ChartConfig {
    pub fn new(display_mode: DisplayMode) -> Self {
        Self {
            display_mode,
            color_scheme: DARK_SCHEME,
            annotation_template: annotation_template(display_mode).to_string(),
        }
    }
}

fn annotation_template(mode: DisplayMode) -> &'static str {
    match mode {
        DisplayMode::InflationAdjusted => PURCHASING_POWER_ANNOTATION_TEMPLATE,
        DisplayMode::Nominal => NOMINAL_ANNOTATION_TEMPLATE,
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::new(DisplayMode::InflationAdjusted)
    }
}

pub fn build_chart(config: &ChartConfig, formatter: &dyn CurrencyFormatter) -> ChartData {
    let mode = config.display_mode;
    let labels: Vec<u32> = (0..=HORIZON_YEARS).collect();

    let datasets: Vec<Dataset> = SCENARIOS
        .iter()
        .zip(config.color_scheme.lines)
        .map(|(scenario, style)| Dataset {
            key: scenario.key,
            label: dataset_label(scenario, mode),
            data: series_for(
                scenario.model,
                scenario.final_values.for_mode(mode),
                HORIZON_YEARS,
            ),
            style,
            tension: LINE_TENSION,
        })
        .collect();

    let cards = SCENARIOS
        .iter()
        .zip(config.color_scheme.lines)
        .map(|(scenario, style)| SummaryCard {
            key: scenario.key,
            title: format!("{}% Annual Return", scenario.rate_percent()),
            nominal: scenario.final_values.nominal,
            todays_power: scenario.final_values.todays_power,
            nominal_text: formatter.currency(scenario.final_values.nominal),
            todays_power_text: formatter.currency(scenario.final_values.todays_power),
            accent_color: style.border_color,
        })
        .collect();

    let annotation = disparity_annotation(config, &datasets, formatter);

    ChartData {
        labels,
        datasets,
        annotation,
        cards,
        y_axis_title: y_axis_title(mode),
    }
}

/// Gap between the highest-rate and the baseline scenario at the horizon.
pub fn disparity(mode: DisplayMode) -> f64 {
    let (baseline, top) = baseline_and_top();
    top.final_values.for_mode(mode) - baseline.final_values.for_mode(mode)
}

fn baseline_and_top() -> (&'static Scenario, &'static Scenario) {
    let baseline = SCENARIOS
        .iter()
        .find(|s| s.is_baseline())
        .unwrap_or(&SCENARIOS[0]);
    let top = SCENARIOS
        .iter()
        .max_by(|a, b| a.annual_rate.total_cmp(&b.annual_rate))
        .unwrap_or(&SCENARIOS[SCENARIOS.len() - 1]);
    (baseline, top)
}

fn disparity_annotation(
    config: &ChartConfig,
    datasets: &[Dataset],
    formatter: &dyn CurrencyFormatter,
) -> DisparityAnnotation {
    let (baseline, top) = baseline_and_top();
    let endpoint = |key: &str| {
        datasets
            .iter()
            .find(|d| d.key == key)
            .and_then(|d| d.data.last().copied())
            .unwrap_or(f64::NAN)
    };
    let amount = disparity(config.display_mode);
    let amount_text = format!("{} kr", formatter.decimal(amount));
    let horizon = HORIZON_YEARS as f64;

    DisparityAnnotation {
        amount,
        text: config.annotation_template.replace("{amount}", &amount_text),
        x: horizon,
        connector_x_min: horizon - CONNECTOR_LENGTH_YEARS,
        y_min: endpoint(baseline.key),
        y_max: endpoint(top.key),
        line_color: config.color_scheme.annotation_line,
        label_background: config.color_scheme.annotation_background,
    }
}

fn dataset_label(scenario: &Scenario, mode: DisplayMode) -> String {
    let rate = scenario.rate_percent();
    if scenario.is_baseline() {
        return format!("Base ({rate}% annual interest)");
    }
    match mode {
        DisplayMode::InflationAdjusted => format!("{rate}% (todays purchasing power)"),
        DisplayMode::Nominal => format!("{rate}% (nominal)"),
    }
}

fn y_axis_title(mode: DisplayMode) -> &'static str {
    match mode {
        DisplayMode::InflationAdjusted => "Value in Today's Purchasing Power (DKK)",
        DisplayMode::Nominal => "Nominal Value (DKK)",
    }
}
