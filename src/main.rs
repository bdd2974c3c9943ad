use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use transit_catalogue::{format_number, json, render, text};
use transit_catalogue::{Catalogue, ItineraryItem, TransportRouter};

#[derive(Debug, thiserror::Error)]
enum CatalogueLoadError {
    #[error("{0}: {1}")]
    Json(PathBuf, #[source] json::Error),

    #[error("{0}: {1}")]
    Text(PathBuf, #[source] text::Error),
}

#[derive(Parser)]
struct Cli {
    /// The path to the input document
    input: PathBuf,

    /// Read the input as a JSON document, instead of a (possibly compressed) text document
    #[arg(long)]
    json: bool,

    /// Print the SVG map of the network, using render settings of the JSON document
    #[arg(long, requires = "json")]
    map: bool,

    /// Name of the stop to print the fastest way from
    #[arg(long, requires = "to")]
    from: Option<String>,

    /// Name of the stop to print the fastest way to
    #[arg(long, requires = "from")]
    to: Option<String>,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let mut catalogue = Catalogue::new();
    let mut out = io::BufWriter::new(io::stdout().lock());

    if cli.json {
        let requests = load_json(&mut catalogue, &cli.input)?;
        log_loaded(&catalogue, requests.stat_requests.len());

        let router = TransportRouter::new(&catalogue);
        if cli.map {
            writeln!(out, "{}", render::render_map(&catalogue, &requests.render_settings))?;
        }
        json::write_responses(&mut out, &catalogue, &router, &requests)?;
        print_way(&mut out, &router, &cli)?;
    } else {
        let requests = load_text(&mut catalogue, &cli.input)?;
        log_loaded(&catalogue, requests.len());

        let router = TransportRouter::new(&catalogue);
        for request in &requests {
            text::write_response(&mut out, &catalogue, &router, request)?;
        }
        print_way(&mut out, &router, &cli)?;
    }

    out.flush()?;
    Ok(())
}

fn log_loaded(catalogue: &Catalogue, stat_requests: usize) {
    log::info!(
        "loaded {} stops, {} buses and {} stat requests",
        catalogue.stop_count(),
        catalogue.bus_count(),
        stat_requests,
    );
}

fn load_json<P: AsRef<Path>>(
    catalogue: &mut Catalogue,
    path: P,
) -> Result<json::Requests, CatalogueLoadError> {
    match json::load_from_file(catalogue, path.as_ref()) {
        Ok(requests) => Ok(requests),
        Err(e) => Err(CatalogueLoadError::Json(PathBuf::from(path.as_ref()), e)),
    }
}

fn load_text<P: AsRef<Path>>(
    catalogue: &mut Catalogue,
    path: P,
) -> Result<Vec<text::StatRequest>, CatalogueLoadError> {
    match text::load_from_file(catalogue, text::FileFormat::Unknown, path.as_ref()) {
        Ok(requests) => Ok(requests),
        Err(e) => Err(CatalogueLoadError::Text(PathBuf::from(path.as_ref()), e)),
    }
}

fn print_way<W: Write>(
    out: &mut W,
    router: &TransportRouter<'_>,
    cli: &Cli,
) -> Result<(), Box<dyn Error>> {
    let (from, to) = match (&cli.from, &cli.to) {
        (Some(from), Some(to)) => (from, to),
        _ => return Ok(()),
    };

    let way = router.find_way(from, to)?;
    writeln!(
        out,
        "{} > {}: {} min",
        from,
        to,
        format_number(way.total_time)
    )?;
    for item in &way.items {
        match *item {
            ItineraryItem::Wait { stop_name, time } => {
                writeln!(out, "  wait at {} for {} min", stop_name, format_number(time))?
            }
            ItineraryItem::Bus {
                bus_name,
                span_count,
                time,
            } => writeln!(
                out,
                "  bus {} for {} min ({} {})",
                bus_name,
                format_number(time),
                span_count,
                if span_count == 1 { "stop" } else { "stops" },
            )?,
        }
    }
    Ok(())
}
