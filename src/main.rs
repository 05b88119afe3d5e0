mod charts;
mod config;
mod dashboard;
mod fetch;
mod filters;
mod format;
mod pages;
mod raw;
mod renderer;
mod templates;
mod view;

use crate::config::{Args, Command};
use crate::dashboard::{Dashboard, PassResult};
use crate::fetch::{ApiClient, FileSource, Source};
use crate::filters::Slot;
use crate::pages::{Analysis, Board, Overview};
use crate::templates::{create_index, Link};
use clap::Parser;
use log::{info, warn};
use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::Instant;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let now = Instant::now();
    let args = Args::parse();
    if let Err(e) = args.validate() {
        e.exit();
    }

    let source: Box<dyn Source> = match &args.input {
        Some(path) => Box::new(FileSource::new(path.clone())),
        None => Box::new(ApiClient::new(&args.base_url, args.timeout())?),
    };
    let target = args.target_dir.as_path();
    fs::create_dir_all(target.join("raw"))?;

    match args.command {
        Command::Overview { region, macroarea } => {
            build::<Overview>(source.as_ref(), target, [region, macroarea])?;
        }
        Command::Analysis {
            macro_area,
            funding_source,
        } => {
            build::<Analysis>(source.as_ref(), target, [macro_area, funding_source])?;
        }
        Command::All => {
            build_all::<Overview>(source.as_ref(), target)?;
            build_all::<Analysis>(source.as_ref(), target)?;
            let links = vec![link::<Overview>(), link::<Analysis>()];
            fs::write(target.join("index.html"), create_index(&links).into_string())?;
        }
    }

    info!("Total time elapsed: {}ms", now.elapsed().as_millis());
    Ok(())
}

/// Run one pass of dashboard `B` with the given filter values, in control
/// order, and write its page and committed view model under `target`.
fn build<B: Board>(
    source: &dyn Source,
    target: &Path,
    filters: [Option<String>; 2],
) -> Result<PassResult, Box<dyn Error>> {
    let mut dashboard: Dashboard<B> = Dashboard::new();
    for (slot, value) in [Slot::First, Slot::Second].into_iter().zip(filters) {
        if let Some(value) = value {
            if let Err(e) = dashboard.filters_mut().change(slot, &value) {
                warn!("{}: ignoring filter: {}", B::NAME, e);
            }
        }
    }

    let result = dashboard.run_pass(source);

    let stem = dashboard.page_stem();
    let page = target.join(format!("{}.html", stem));
    fs::write(&page, dashboard.to_html().into_string())?;
    if let Some(view) = dashboard.view() {
        let raw = target.join("raw").join(format!("{}.json", stem));
        fs::write(raw, serde_json::to_string_pretty(view)?)?;
    }
    info!("{} written ({:?})", page.display(), result);
    Ok(result)
}

/// One page per filter selection of `B`, the targets of its apply button.
fn build_all<B: Board>(source: &dyn Source, target: &Path) -> Result<(), Box<dyn Error>> {
    let selections = selections::<B>();
    let mut committed = 0;
    for selection in selections.iter().cloned() {
        if let PassResult::Committed(_) = build::<B>(source, target, selection)? {
            committed += 1;
        }
    }
    info!("{}: {}/{} pages committed", B::NAME, committed, selections.len());
    Ok(())
}

/// No filter, then each option of the first control, then each option of
/// the second one.
fn selections<B: Board>() -> Vec<[Option<String>; 2]> {
    let filters = B::filters();
    let [first, second] = filters.controls();
    let mut all = vec![[None, None]];
    all.extend(first.options.iter().map(|(v, _)| [Some(v.to_string()), None]));
    all.extend(second.options.iter().map(|(v, _)| [None, Some(v.to_string())]));
    all
}

fn link<B: Board>() -> Link {
    Link {
        title: B::TITLE,
        description: B::DESCRIPTION,
        permalink: format!("{}.html", B::NAME),
    }
}

#[cfg(test)]
mod test {
    use super::selections;
    use crate::filters::{FUNDING_SOURCES, MACROAREAS, REGIONS};
    use crate::pages::{Analysis, Overview};

    #[test]
    fn test_selections_cover_every_option() {
        let overview = selections::<Overview>();
        assert_eq!(overview.len(), 1 + REGIONS.len() + MACROAREAS.len());
        assert_eq!(overview[0], [None, None]);
        assert_eq!(overview[12], [Some("012".to_string()), None]);
        assert_eq!(
            overview.last(),
            Some(&[None, Some("TRASVERSALE".to_string())])
        );

        let analysis = selections::<Analysis>();
        assert_eq!(analysis.len(), 1 + MACROAREAS.len() + FUNDING_SOURCES.len());
        assert!(analysis.iter().all(|s| s[0].is_none() || s[1].is_none()));
    }
}
