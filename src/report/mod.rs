//! Renders a prediction, its optional explanations, and artifact provenance as text or JSON.

mod chart;

pub use chart::{bar_chart, progress_bar};

use crate::config::OutputFormat;
use crate::error::Result;
use crate::explain::{FeatureImportance, Sensitivity};
use crate::model::ArtifactFingerprints;
use crate::risk::Prediction;
use serde::Serialize;
use std::io::Write;

const PROGRESS_WIDTH: usize = 30;
const CHART_WIDTH: usize = 30;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Prediction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<Sensitivity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<Vec<FeatureImportance>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<ArtifactFingerprints>,
}

impl Report {
    pub fn render(&self, format: OutputFormat, w: &mut impl Write) -> Result<()> {
        match format {
            OutputFormat::Text => self.render_text(w),
            OutputFormat::Json => self.render_json(w),
        }
    }

    pub fn render_json(&self, w: &mut impl Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *w, self)?;
        writeln!(w)?;
        Ok(())
    }

    pub fn render_text(&self, w: &mut impl Write) -> Result<()> {
        self.write_text(w)?;
        Ok(())
    }

    fn write_text(&self, w: &mut impl Write) -> std::io::Result<()> {
        if let Some(p) = &self.prediction {
            writeln!(w, "Prediction: {}", p.label)?;
            writeln!(w, "Failure Probability: {:.2}", p.probability)?;
            writeln!(w, "{}", progress_bar(p.probability, PROGRESS_WIDTH))?;
            writeln!(w, "[{:?}] {}", p.severity, p.severity.banner())?;
        }

        if let Some(s) = &self.sensitivity {
            writeln!(w)?;
            writeln!(w, "Which feature drives this prediction most?")?;
            let rows: Vec<(String, f64)> = s
                .impacts
                .iter()
                .map(|i| (i.feature.to_string(), i.delta))
                .collect();
            bar_chart(
                w,
                "Instance-level Feature Dependency",
                "Change in Failure Probability (if set to mean)",
                &rows,
                CHART_WIDTH,
            )?;
            writeln!(w, "Note: {}", s.method)?;
        }

        if let Some(fi) = &self.importance {
            writeln!(w)?;
            let rows: Vec<(String, f64)> = fi
                .iter()
                .map(|f| (f.feature.to_string(), f.importance))
                .collect();
            bar_chart(
                w,
                "Global Feature Importance",
                "Importance (normalized)",
                &rows,
                CHART_WIDTH,
            )?;
        }
        Ok(())
    }
}
