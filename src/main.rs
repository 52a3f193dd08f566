use std::{env, process, time::Instant};

use listing_matcher::{io, Error, Matcher, MatcherConfig};

fn print_usage() {
    eprintln!("Usage: listing-matcher [--products FILE] [--listings FILE] [--out FILE]");
    eprintln!("                       [--threshold X] [--exclude-listing-fields]");
    eprintln!("Defaults: ./products.txt ./listings.txt results.txt threshold=0.25");
    eprintln!("--exclude-listing-fields drops price/currency from listing tokenization");
}

fn main() {
    let program_start = Instant::now();

    // ---- flag parsing ----
    let mut args = env::args().skip(1);
    let mut products_path = String::from("./products.txt");
    let mut listings_path = String::from("./listings.txt");
    let mut out_path = String::from("results.txt");
    let mut config = MatcherConfig::default();
    while let Some(a) = args.next() {
        match a.as_str() {
            "--products" => {
                if let Some(v) = args.next() { products_path = v; } else { eprintln!("[error] --products requires a path"); process::exit(2); }
            }
            "--listings" => {
                if let Some(v) = args.next() { listings_path = v; } else { eprintln!("[error] --listings requires a path"); process::exit(2); }
            }
            "--out" => {
                if let Some(v) = args.next() { out_path = v; } else { eprintln!("[error] --out requires a path"); process::exit(2); }
            }
            "--threshold" => {
                match args.next().as_deref().map(str::parse::<f64>) {
                    Some(Ok(t)) if t.is_finite() => config.score_threshold = t,
                    _ => { eprintln!("[error] --threshold requires a finite number"); process::exit(2); }
                }
            }
            "--exclude-listing-fields" => {
                config = config.exclude_listing_fields();
            }
            "-h" | "--help" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("[warn] unknown argument ignored: {}", other);
            }
        }
    }

    if let Err(e) = run(&products_path, &listings_path, &out_path, config) {
        eprintln!("[error] {}", e);
        process::exit(1);
    }
    eprintln!("[time] program_total={:.2}ms", program_start.elapsed().as_secs_f64() * 1000.0);
}

fn run(
    products_path: &str,
    listings_path: &str,
    out_path: &str,
    config: MatcherConfig,
) -> Result<(), Error> {
    eprintln!("[stage] loading records");
    let load_start = Instant::now();
    let products = io::read_products(products_path)?;
    let listings = io::read_listings(listings_path)?;
    eprintln!(
        "[info] loaded {} products from {} and {} listings from {}",
        products.len(),
        products_path,
        listings.len(),
        listings_path
    );

    eprintln!("[stage] matching (threshold={})", config.score_threshold);
    let match_start = Instant::now();
    let matcher = Matcher::new(config);
    let results = matcher.run(&products, &listings)?;

    eprintln!("[stage] writing results");
    let write_start = Instant::now();
    io::write_results(out_path, &results, &listings)?;
    let done = Instant::now();

    eprintln!(
        "[time] load={:.2}ms match={:.2}ms write={:.2}ms",
        match_start.duration_since(load_start).as_secs_f64() * 1000.0,
        write_start.duration_since(match_start).as_secs_f64() * 1000.0,
        done.duration_since(write_start).as_secs_f64() * 1000.0
    );
    eprintln!(
        "[info] matched {} of {} products -> {}",
        results.len(),
        products.len(),
        out_path
    );
    Ok(())
}
