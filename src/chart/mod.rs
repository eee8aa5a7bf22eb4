//! Renderer-agnostic description of the result figure
//!
//! A [`Figure`] is three stacked panels sharing a time axis in days:
//!
//! | Panel | Series | x index |
//! |-------|--------|---------|
//! | Drug concentration | simvastatin acid | hourly |
//! | cLDL | treated, untreated, healthy baseline | daily |
//! | Reduction | percentage reduction | daily |
//!
//! Each panel carries whole-day tick positions. Drawing is left to whatever
//! consumes the figure, typically through its JSON form.

mod ticks;

use serde::Serialize;

use crate::simulator::Simulation;
use crate::StatinError;

pub use ticks::{integer_ticks, DEFAULT_MAX_TICKS};

const TIME_LABEL: &str = "Time (days)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

/// One line on a panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub style: LineStyle,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    fn new(label: &str, style: LineStyle, x: &[f64], y: &[f64]) -> Self {
        Self {
            label: label.to_string(),
            style,
            x: x.to_vec(),
            y: y.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend: bool,
    pub x_ticks: Vec<f64>,
    pub series: Vec<Series>,
}

impl Panel {
    fn new(title: &str, y_label: &str, legend: bool, series: Vec<Series>) -> Self {
        let (min, max) = series
            .iter()
            .flat_map(|s| s.x.iter().copied())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
                (lo.min(x), hi.max(x))
            });
        Self {
            title: title.to_string(),
            x_label: TIME_LABEL.to_string(),
            y_label: y_label.to_string(),
            legend,
            x_ticks: integer_ticks(min, max, DEFAULT_MAX_TICKS),
            series,
        }
    }
}

/// The three-panel result figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn from_simulation(simulation: &Simulation) -> Self {
        let t = simulation.trajectories();
        let hours = t.hours().to_vec();
        let days = t.days().to_vec();

        let drug = Panel::new(
            "Simvastatin Acid Concentration in the Blood over Time",
            "Simvastatin Acid Concentration (mg/dL)",
            false,
            vec![Series::new(
                "Simvastatin Acid",
                LineStyle::Solid,
                &hours,
                &t.drug().to_vec(),
            )],
        );

        let cldl = Panel::new(
            "cLDL Concentration in the Blood over Time",
            "cLDL Concentration (mg/dL)",
            true,
            vec![
                Series::new(
                    "Treated cLDL Concentration",
                    LineStyle::Solid,
                    &days,
                    &t.treated().to_vec(),
                ),
                Series::new(
                    "Untreated cLDL Concentration",
                    LineStyle::Dashed,
                    &days,
                    &t.untreated().to_vec(),
                ),
                Series::new(
                    "Healthy Baseline cLDL",
                    LineStyle::Dotted,
                    &days,
                    &t.healthy().to_vec(),
                ),
            ],
        );

        let reduction = Panel::new(
            "Total Percentage Reduction in cLDL over Time",
            "Percentage Reduction in cLDL",
            false,
            vec![Series::new(
                "Total Percentage Reduction in cLDL",
                LineStyle::Solid,
                &days,
                &t.reduction().to_vec(),
            )],
        );

        Self {
            panels: vec![drug, cldl, reduction],
        }
    }

    pub fn to_json(&self) -> Result<String, StatinError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Simulation {
    /// Figure description of this run
    pub fn figure(&self) -> Figure {
        Figure::from_simulation(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SimulationConfig;
    use crate::simulator::simulate;

    fn figure() -> Figure {
        simulate(&SimulationConfig::default().with_max_days(3))
            .unwrap()
            .figure()
    }

    #[test]
    fn three_panels_in_order() {
        let figure = figure();
        let titles: Vec<_> = figure.panels.iter().map(|p| p.title.as_str()).collect();

        assert_eq!(
            titles,
            [
                "Simvastatin Acid Concentration in the Blood over Time",
                "cLDL Concentration in the Blood over Time",
                "Total Percentage Reduction in cLDL over Time",
            ]
        );
        assert!(figure.panels.iter().all(|p| p.x_label == "Time (days)"));
        assert_eq!(figure.panels[1].series.len(), 3);
        assert!(figure.panels[1].legend);
    }

    #[test]
    fn series_lengths_follow_their_index() {
        let figure = figure();

        let drug = &figure.panels[0].series[0];
        assert_eq!(drug.x.len(), 3 * 24 + 1);
        assert_eq!(drug.x.len(), drug.y.len());

        for series in &figure.panels[1].series {
            assert_eq!(series.x, vec![0.0, 1.0, 2.0, 3.0]);
            assert_eq!(series.y.len(), 4);
        }
        assert_eq!(figure.panels[0].x_ticks, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn line_styles_distinguish_cldl_arms() {
        let styles: Vec<_> = figure().panels[1].series.iter().map(|s| s.style).collect();
        assert_eq!(
            styles,
            [LineStyle::Solid, LineStyle::Dashed, LineStyle::Dotted]
        );
    }

    #[test]
    fn json_uses_lowercase_styles() {
        let json = figure().to_json().unwrap();
        assert!(json.contains("\"dashed\""));
        assert!(json.contains("\"x_ticks\""));
    }
}
