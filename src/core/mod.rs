mod format;
mod growth;
mod scenario;
mod types;

pub use format::{CurrencyFormatter, DanishKrone};
pub use growth::{
    annual_contribution_balances, exponential_series, linear_series, series_for,
    todays_purchasing_power,
};
pub use scenario::{
    DARK_SCHEME, HORIZON_YEARS, INFLATION_RATE, MONTHLY_CONTRIBUTION, NOMINAL_ANNOTATION_TEMPLATE,
    PURCHASING_POWER_ANNOTATION_TEMPLATE, SCENARIOS, build_chart, disparity,
};
pub use types::{
    ChartConfig, ChartData, ColorScheme, Dataset, DisparityAnnotation, DisplayMode, FinalValues,
    GrowthModel, LineStyle, Scenario, ScenarioError, ScenarioParameters, SummaryCard,
};
