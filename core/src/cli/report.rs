use crate::api::VolumeSummary;
use crate::render::RenderedOutputs;
use std::fmt;

/// Text report formatter for a loaded CT volume
pub struct TextReport<'a> {
    summary: &'a VolumeSummary,
    outputs: &'a RenderedOutputs,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(summary: &'a VolumeSummary, outputs: &'a RenderedOutputs) -> Self {
        Self { summary, outputs }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;

        writeln!(f, "CT Volume")?;
        writeln!(f, "=========")?;
        writeln!(f)?;
        writeln!(f, "Slices:         {}", s.slices)?;
        writeln!(f, "Slice Shape:    {} x {}", s.rows, s.columns)?;
        writeln!(f, "Ordering:       {}", s.order)?;
        writeln!(f, "Instances:      {}", format_instances(&s.instance_numbers))?;
        match s.pixel_spacing {
            Some(spacing) => writeln!(f, "Pixel Spacing:  {}", spacing)?,
            None => writeln!(f, "Pixel Spacing:  unknown")?,
        }
        match s.slice_spacing {
            Some(spacing) => writeln!(f, "Slice Spacing:  {} mm", spacing)?,
            None => writeln!(f, "Slice Spacing:  unknown")?,
        }
        writeln!(f)?;

        writeln!(f, "Hounsfield Units")?;
        writeln!(f, "----------------")?;
        if let Some(stats) = s.statistics {
            writeln!(f, "Min:            {:.1}", stats.min)?;
            writeln!(f, "Max:            {:.1}", stats.max)?;
            writeln!(f, "Mean:           {:.1}", stats.mean)?;
            writeln!(f, "Voxels:         {}", stats.voxels)?;
        }
        let binned: u64 = s.histogram_counts.iter().sum();
        writeln!(
            f,
            "Histogram:      {} bins, {} voxels binned, {} outside range",
            s.histogram_counts.len(),
            binned,
            s.histogram_excluded
        )?;
        if let Some((center, count)) = s.histogram_peak {
            writeln!(f, "Peak Bin:       {:.1} HU ({} voxels)", center, count)?;
        }
        writeln!(f)?;

        writeln!(f, "Displaying axial slice #{}", s.displayed_slice)?;
        writeln!(f, "Slice Image:    {}", self.outputs.slice_image.display())?;
        writeln!(f, "Histogram Plot: {}", self.outputs.histogram_plot.display())?;

        Ok(())
    }
}

fn format_instances(instances: &[Option<i32>]) -> String {
    if instances.is_empty() {
        return "none".to_string();
    }
    instances
        .iter()
        .map(|n| n.map_or_else(|| "-".to_string(), |n| n.to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}
