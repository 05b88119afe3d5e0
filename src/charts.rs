use crate::format::CurrencyPolicy;
use maud::{html, Markup, PreEscaped};
use regex::{Captures, Regex};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Tooltip line precomputed per data point by the formatter, stored on the
/// dataset as `tooltipLabels`.
const TOOLTIP_LABEL: &str =
    "#function(context) { return context.dataset.tooltipLabels[context.dataIndex]; }#";
/// Tooltip title showing the unshortened category caption.
const TOOLTIP_FULL_TITLE: &str =
    "#function(items) { return items[0].chart.data.fullLabels[items[0].dataIndex]; }#";
/// Axis tick text precomputed by the formatter, stored on the scale.
const TICK_LABEL: &str = "#function(value) { return this.options.tickLabels[value] ?? value; }#";
/// The only strings emitted as code.
const CALLBACKS: &[&str] = &[TOOLTIP_LABEL, TOOLTIP_FULL_TITLE, TICK_LABEL];

const FONT_FAMILY: &str = "'Arimo', sans-serif";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Kind {
    #[serde(rename = "pie")]
    Pie,
    #[serde(rename = "bar")]
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Indigo,
    Slate,
    Periwinkle,
    Lavender,
    Mist,
    Haze,
    Snow,
    White,
    Grid,
}

impl Color {
    fn components(&self) -> (u8, u8, u8, f32) {
        match self {
            Color::Indigo => (0x2b, 0x29, 0xa7, 1.0),
            Color::Slate => (0x50, 0x4f, 0x9c, 1.0),
            Color::Periwinkle => (0x7f, 0x7e, 0xc7, 1.0),
            Color::Lavender => (0xa5, 0xa4, 0xd6, 1.0),
            Color::Mist => (0xc7, 0xc7, 0xe7, 1.0),
            Color::Haze => (0xe0, 0xe0, 0xf0, 1.0),
            Color::Snow => (0xf0, 0xf0, 0xf8, 1.0),
            Color::White => (0xff, 0xff, 0xff, 1.0),
            Color::Grid => (0xe0, 0xe0, 0xe0, 1.0),
        }
    }

    /// Slice colors of pie charts, darkest first.
    pub fn palette() -> Vec<Color> {
        vec![
            Color::Indigo,
            Color::Slate,
            Color::Periwinkle,
            Color::Lavender,
            Color::Mist,
            Color::Haze,
            Color::Snow,
        ]
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (r, g, b, a) = self.components();
        write!(f, "rgba({},{},{},{})", r, g, b, a)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    #[serde(skip)]
    id: String,
    #[serde(rename = "type")]
    kind: Kind,
    data: ChartData,
    options: Options,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Options {
    responsive: bool,
    maintain_aspect_ratio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    index_axis: Option<&'static str>,
    plugins: Plugins,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    scales: BTreeMap<&'static str, Scale>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Plugins {
    title: Title,
    legend: Legend,
    tooltip: Tooltip,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Title {
    display: bool,
    text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Legend {
    display: bool,
    position: &'static str,
    labels: LegendLabels,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct LegendLabels {
    padding: u8,
    font: Font,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tooltip {
    callbacks: Callbacks,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct Callbacks {
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Scale {
    begin_at_zero: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
    ticks: Ticks,
    grid: Grid,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    tick_labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Ticks {
    #[serde(skip_serializing_if = "Option::is_none")]
    step_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback: Option<&'static str>,
    font: Font,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Grid {
    display: bool,
    color: Color,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Font {
    size: u8,
    family: &'static str,
}

impl Font {
    fn new(size: u8) -> Font {
        Font {
            size,
            family: FONT_FAMILY,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartData {
    labels: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    full_labels: Vec<String>,
    datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: Vec<Color>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub border_color: Vec<Color>,
    pub border_width: u8,
    /// One line per data point, shown by the tooltip callback.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tooltip_labels: Vec<String>,
}

impl Chart {
    pub fn new(id: &str, title: &str, kind: Kind, labels: Vec<String>) -> Chart {
        let legend = Legend {
            display: kind == Kind::Pie,
            position: "bottom",
            labels: LegendLabels {
                padding: 15,
                font: Font::new(12),
            },
        };
        Chart {
            id: id.to_string(),
            kind,
            data: ChartData {
                labels,
                full_labels: vec![],
                datasets: vec![],
            },
            options: Options {
                responsive: true,
                maintain_aspect_ratio: true,
                index_axis: None,
                plugins: Plugins {
                    title: Title {
                        display: true,
                        text: title.to_string(),
                    },
                    legend,
                    tooltip: Tooltip::default(),
                },
                scales: BTreeMap::new(),
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Adds a dataset; when it carries `tooltip_labels` the tooltip shows them.
    pub fn add_dataset(&mut self, dataset: Dataset) {
        if !dataset.tooltip_labels.is_empty() {
            self.options.plugins.tooltip.callbacks.label = Some(TOOLTIP_LABEL);
        }
        self.data.datasets.push(dataset)
    }

    /// Bars grow along the x axis.
    pub fn horizontal(mut self) -> Chart {
        self.options.index_axis = Some("y");
        self
    }

    /// Category captions are shown as given on the axis, `full` in the
    /// tooltip title.
    pub fn set_full_labels(&mut self, full: Vec<String>) {
        self.data.full_labels = full;
        self.options.plugins.tooltip.callbacks.title = Some(TOOLTIP_FULL_TITLE);
    }

    /// Configure both axes of a bar chart, with currency ticks on the value
    /// axis computed from every dataset.
    pub fn currency_axis(&mut self, policy: CurrencyPolicy) {
        let (value_axis, category_axis) = match self.options.index_axis {
            Some("y") => ("x", "y"),
            _ => ("y", "x"),
        };
        let values: Vec<f64> = self
            .data
            .datasets
            .iter()
            .flat_map(|d| d.data.iter().copied())
            .collect();
        let (min, max, step) = axis_ticks(&values);

        let mut tick_labels = BTreeMap::new();
        let steps = ((max - min) / step).round() as usize;
        for i in 0..=steps {
            let value = min + i as f64 * step;
            tick_labels.insert(js_number_key(value), policy.format_currency(value));
        }

        self.options.scales.insert(
            value_axis,
            Scale {
                begin_at_zero: true,
                min: Some(min),
                max: Some(max),
                ticks: Ticks {
                    step_size: Some(step),
                    callback: Some(TICK_LABEL),
                    font: Font::new(10),
                },
                grid: Grid {
                    display: true,
                    color: Color::Grid,
                },
                tick_labels,
            },
        );
        self.options.scales.insert(
            category_axis,
            Scale {
                begin_at_zero: false,
                min: None,
                max: None,
                ticks: Ticks {
                    step_size: None,
                    callback: None,
                    font: Font::new(11),
                },
                grid: Grid {
                    display: false,
                    color: Color::Grid,
                },
                tick_labels: BTreeMap::new(),
            },
        );
    }

    /// Returns `(labels, values)` lengths of the first dataset whose values
    /// or tooltip lines are not paired one to one with the labels.
    pub fn misaligned(&self) -> Option<(usize, usize)> {
        let labels = self.data.labels.len();
        self.data
            .datasets
            .iter()
            .find(|d| {
                d.data.len() != labels
                    || (!d.tooltip_labels.is_empty() && d.tooltip_labels.len() != labels)
            })
            .map(|d| (labels, d.data.len()))
    }

    /// The Chart.js configuration object, with callbacks as raw javascript.
    /// Only the string literals equal to a known callback lose their quotes,
    /// and `</` is escaped so no value can close the embedding script.
    pub fn to_json_dict(&self) -> Result<String, serde_json::Error> {
        let s = serde_json::to_string(&self)?;
        let re = Regex::new(r#""(?:[^"\\]|\\.)*""#).expect("static pattern");
        let result = re.replace_all(&s, |caps: &Captures| {
            let literal = &caps[0];
            let content = &literal[1..literal.len() - 1];
            if CALLBACKS.contains(&content) {
                content.trim_matches('#').to_string()
            } else {
                literal.to_string()
            }
        });
        Ok(result.replace("</", "<\\/"))
    }
}

#[cfg(test)]
impl Chart {
    pub fn labels(&self) -> &[String] {
        &self.data.labels
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.data.datasets
    }
}

/// Canvas bound to `id` plus the script instantiating the chart on it.
pub fn mount_html(id: &str, config: &str) -> Markup {
    let script = format!(
        "var {} = new Chart(document.getElementById('{}'), {});",
        id, id, config,
    );

    html! {
        div class="chart" {
            canvas id=(id) {
            }
        }
        script {
            (PreEscaped(script))
        }
    }
}

/// `(min, max, step)` of a value axis covering `values` and zero, with a
/// 1/2/5 step giving about five intervals.
pub fn axis_ticks(values: &[f64]) -> (f64, f64, f64) {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let lo = finite.clone().fold(0.0, f64::min);
    let hi = finite.fold(0.0, f64::max);
    if hi - lo <= 0.0 {
        return (0.0, 1.0, 1.0);
    }
    let raw = (hi - lo) / 5.0;
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = nice * magnitude;
    ((lo / step).floor() * step, (hi / step).ceil() * step, step)
}

// property name javascript uses when indexing an object with a number
fn js_number_key(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
