use colored::Colorize;
use serde::Serialize;

use crate::country::Country;
use crate::pipeline::PAGE_SIZE;
use crate::view::ViewSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

/// Layout switches. Card variants that drop the population or the flag are
/// just different options here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_population: bool,
    pub show_flags: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_population: true,
            show_flags: true,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct OutputRecord {
    pub name: String,
    pub region: String,
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PageReport {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_records: usize,
    pub page_size: usize,
    pub search: String,
    pub filter: String,
    pub sort: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub countries: Vec<OutputRecord>,
}

pub fn build_records(countries: &[Country], options: RenderOptions) -> Vec<OutputRecord> {
    countries
        .iter()
        .map(|c| OutputRecord {
            name: c.name.clone(),
            region: c.region.clone(),
            area: c.area,
            population: c.population.filter(|_| options.show_population),
            flag: c
                .flag_url()
                .filter(|_| options.show_flags)
                .map(str::to_string),
        })
        .collect()
}

pub fn build_report(snapshot: &ViewSnapshot<'_>, options: RenderOptions) -> PageReport {
    PageReport {
        current_page: snapshot.current_page,
        total_pages: snapshot.total_pages,
        total_records: snapshot.total_records,
        page_size: PAGE_SIZE,
        search: snapshot.query.search.clone(),
        filter: snapshot.query.filter.to_string(),
        sort: snapshot.query.sort.to_string(),
        warning: snapshot.warning.map(|w| w.to_string()),
        error: snapshot.error.map(str::to_string),
        countries: build_records(snapshot.countries, options),
    }
}

pub fn render_json(snapshot: &ViewSnapshot<'_>, options: RenderOptions) -> Vec<u8> {
    let mut out = serde_json::to_vec_pretty(&build_report(snapshot, options))
        .unwrap_or_else(|_| b"{}".to_vec());
    out.push(b'\n');
    out
}

pub fn format_area(area: Option<f64>) -> String {
    match area {
        None => "-".to_string(),
        Some(a) if a.fract() == 0.0 => format!("{a:.0} km2"),
        Some(a) => format!("{a} km2"),
    }
}

fn kv_line(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!(":: {:<10}: {}\n", label, value));
}

/// One entry per page, the current one bracketed and highlighted.
pub fn render_page_bar(current_page: usize, total_pages: usize) -> String {
    if total_pages == 0 {
        return "Pages: none".to_string();
    }
    let entries: Vec<String> = (1..=total_pages)
        .map(|n| {
            if n == current_page {
                format!("[{n}]").bold().blue().to_string()
            } else {
                n.to_string()
            }
        })
        .collect();
    format!("Pages: {}", entries.join(" "))
}

pub fn render_text(snapshot: &ViewSnapshot<'_>, options: RenderOptions) -> String {
    let mut out = String::new();
    let query = snapshot.query;
    let search = if query.search.is_empty() {
        "-"
    } else {
        query.search.as_str()
    };
    kv_line(&mut out, "Search", search);
    kv_line(&mut out, "Sort", query.sort.label());
    kv_line(&mut out, "Filter", query.filter.label());

    if snapshot.loading {
        out.push('\n');
        out.push_str(&format!("{}\n", "Loading...".blue()));
        return out;
    }
    if let Some(error) = snapshot.error {
        out.push('\n');
        out.push_str(&format!(
            "{}{}{} {}\n",
            "[".bold().white(),
            "ERR".bold().red(),
            "]".bold().white(),
            error
        ));
        return out;
    }
    if let Some(warning) = snapshot.warning {
        out.push_str(&format!(
            "{}{}{} {}\n",
            "[".bold().white(),
            "WRN".bold().yellow(),
            "]".bold().white(),
            warning
        ));
    }

    let shown = if snapshot.countries.is_empty() {
        format!("0 of {}", snapshot.total_records)
    } else {
        let first = (snapshot.current_page - 1) * PAGE_SIZE + 1;
        let last = first + snapshot.countries.len() - 1;
        format!("{first}-{last} of {}", snapshot.total_records)
    };
    kv_line(&mut out, "Showing", &shown);
    out.push('\n');

    if snapshot.countries.is_empty() {
        out.push_str("No countries match.\n");
    }
    for record in build_records(snapshot.countries, options) {
        let mut line = format!(
            "{:<40} Region: {:<10} Area: {}",
            record.name.bold(),
            record.region,
            format_area(record.area)
        );
        if options.show_population {
            let population = record
                .population
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string());
            line.push_str(&format!("  Population: {population}"));
        }
        if let Some(flag) = record.flag.as_deref() {
            line.push_str(&format!("  {}", flag.dimmed()));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&render_page_bar(snapshot.current_page, snapshot.total_pages));
    out.push('\n');
    out
}

pub fn render(snapshot: &ViewSnapshot<'_>, format: OutputFormat, options: RenderOptions) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(snapshot, options).into_bytes(),
        OutputFormat::Json => render_json(snapshot, options),
    }
}
