use serde::Serialize;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GrowthModel {
    Linear,
    Compound { rate: f64 },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DisplayMode {
    Nominal,
    InflationAdjusted,
}

#[derive(Debug, Error, PartialEq)]
pub enum ScenarioError {
    #[error("horizon_years must be >= 1")]
    EmptyHorizon,
    #[error("annual_rate must be a finite value >= 0, got {0}")]
    InvalidRate(f64),
    #[error("periodic_contribution must be a finite value >= 0, got {0}")]
    InvalidContribution(f64),
}

/// Inputs of one forward-compounding run. Built once per rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioParameters {
    horizon_years: u32,
    annual_rate: f64,
    periodic_contribution: f64,
}

impl ScenarioParameters {
    pub fn new(
        horizon_years: u32,
        annual_rate: f64,
        periodic_contribution: f64,
    ) -> Result<Self, ScenarioError> {
        if horizon_years == 0 {
            return Err(ScenarioError::EmptyHorizon);
        }
        if !annual_rate.is_finite() || annual_rate < 0.0 {
            return Err(ScenarioError::InvalidRate(annual_rate));
        }
        if !periodic_contribution.is_finite() || periodic_contribution < 0.0 {
            return Err(ScenarioError::InvalidContribution(periodic_contribution));
        }
        Ok(Self {
            horizon_years,
            annual_rate,
            periodic_contribution,
        })
    }

    pub fn horizon_years(&self) -> u32 {
        self.horizon_years
    }

    pub fn annual_rate(&self) -> f64 {
        self.annual_rate
    }

    /// Monthly deposit amount.
    pub fn periodic_contribution(&self) -> f64 {
        self.periodic_contribution
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalValues {
    pub nominal: f64,
    pub todays_power: f64,
}

impl FinalValues {
    pub fn for_mode(&self, mode: DisplayMode) -> f64 {
        match mode {
            DisplayMode::Nominal => self.nominal,
            DisplayMode::InflationAdjusted => self.todays_power,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub border_dash: Option<[u32; 2]>,
    pub border_width: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    pub key: &'static str,
    pub annual_rate: f64,
    pub model: GrowthModel,
    pub final_values: FinalValues,
}

impl Scenario {
    pub fn rate_percent(&self) -> u32 {
        (self.annual_rate * 100.0).round() as u32
    }

    pub fn is_baseline(&self) -> bool {
        matches!(self.model, GrowthModel::Linear)
    }
}

/// Line styles for the scenarios, in catalogue order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScheme {
    pub lines: [LineStyle; 4],
    pub annotation_background: &'static str,
    pub annotation_line: &'static str,
}

#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub display_mode: DisplayMode,
    pub color_scheme: ColorScheme,
    /// `{amount}` is replaced by the formatted disparity.
    pub annotation_template: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub key: &'static str,
    pub label: String,
    pub data: Vec<f64>,
    #[serde(flatten)]
    pub style: LineStyle,
    pub tension: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisparityAnnotation {
    pub amount: f64,
    pub text: String,
    pub x: f64,
    pub connector_x_min: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub line_color: &'static str,
    pub label_background: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCard {
    pub key: &'static str,
    pub title: String,
    pub nominal: f64,
    pub todays_power: f64,
    pub nominal_text: String,
    pub todays_power_text: String,
    pub accent_color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub labels: Vec<u32>,
    pub datasets: Vec<Dataset>,
    pub annotation: DisparityAnnotation,
    pub cards: Vec<SummaryCard>,
    pub y_axis_title: &'static str,
}
