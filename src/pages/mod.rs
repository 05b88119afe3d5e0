mod analysis;
mod overview;

use crate::charts::{Chart, Color, Dataset, Kind};
use crate::filters::FilterPair;
use crate::format::CurrencyPolicy;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use analysis::Analysis;
pub use overview::Overview;

/// A dashboard variant: where its payload comes from, how it is turned into
/// a view model, and which KPI elements and charts it fills.
pub trait Board {
    type Raw: DeserializeOwned;
    type View: Serialize;

    /// File stem of the generated page.
    const NAME: &'static str;
    const TITLE: &'static str;
    const DESCRIPTION: &'static str;
    const ROUTE: &'static str;
    /// How KPI cards, tooltips and axes render amounts.
    const POLICY: CurrencyPolicy;
    /// (element id, caption) of the KPI cards, in display order.
    const KPI_CARDS: &'static [(&'static str, &'static str)];
    /// Chart mount points, in display order.
    const MOUNTS: &'static [&'static str];

    fn filters() -> FilterPair;

    /// Dataset shown when the fetch fails; `None` leaves the page as it was.
    fn fallback() -> Option<Self::Raw>;

    fn transform(raw: &Self::Raw) -> Option<Self::View>;

    /// Text of every KPI element, keyed by element id.
    fn kpis(view: &Self::View) -> Vec<(&'static str, String)>;

    /// Every chart, in `MOUNTS` order, each bound to its mount point id.
    fn charts(view: &Self::View) -> Vec<Chart>;
}

/// Caption of a monetary bar series: `<tooltip>: <amount>` in the tooltip,
/// or `<category>: <amount>` without one, and `legend` as the dataset label.
#[derive(Debug, Clone, Copy)]
struct Caption {
    tooltip: Option<&'static str>,
    legend: &'static str,
}

fn pie_chart(
    mount: &str,
    title: &str,
    labels: &[String],
    data: &[f64],
    tooltips: Vec<String>,
) -> Chart {
    let mut chart = Chart::new(mount, title, Kind::Pie, labels.to_vec());
    chart.add_dataset(Dataset {
        data: data.to_vec(),
        background_color: Color::palette(),
        border_color: vec![Color::White],
        border_width: 2,
        tooltip_labels: tooltips,
        ..Default::default()
    });
    chart
}

/// Bar chart of amounts with currency ticks and `<caption>: <amount>`
/// tooltips. One color per bar when `colors` has more than one entry.
#[allow(clippy::too_many_arguments)]
fn bar_chart(
    mount: &str,
    title: &str,
    caption: Caption,
    labels: Vec<String>,
    data: &[f64],
    colors: Vec<Color>,
    policy: CurrencyPolicy,
    horizontal: bool,
) -> Chart {
    let mut chart = Chart::new(mount, title, Kind::Bar, labels.clone());
    if horizontal {
        chart = chart.horizontal();
    }
    let tooltips = labels
        .iter()
        .zip(data.iter())
        .map(|(label, v)| {
            let prefix = caption.tooltip.unwrap_or(label.as_str());
            format!("{}: {}", prefix, policy.format_currency(*v))
        })
        .collect();
    chart.add_dataset(Dataset {
        label: caption.legend.to_string(),
        data: data.to_vec(),
        border_color: colors.clone(),
        background_color: colors,
        border_width: 1,
        tooltip_labels: tooltips,
    });
    chart.currency_axis(policy);
    chart
}
