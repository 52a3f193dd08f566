//! Newline-delimited JSON collaborators at the pipeline boundary: the
//! two input readers and the result writer. The core never touches
//! files; it only sees the in-memory records these produce.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::{json, Map, Value};

use crate::error::Error;
use crate::matcher::{ListingRecord, MatchResults, ProductRecord};

fn parse_line(line: &str, line_no: usize) -> Result<Map<String, Value>, Error> {
    serde_json::from_str(line).map_err(|source| Error::Json {
        line: line_no,
        source,
    })
}

/// Read the product collection. Each line is one JSON object whose
/// `product_name` string field, lower-cased, becomes the record id.
pub fn read_products(path: impl AsRef<Path>) -> Result<Vec<ProductRecord>, Error> {
    let file = File::open(path)?;
    let mut products = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line_no = index + 1;
        let fields = parse_line(&line?, line_no)?;
        let name = fields
            .get("product_name")
            .and_then(Value::as_str)
            .ok_or(Error::MissingProductName { line: line_no })?
            .to_lowercase();
        products.push(ProductRecord { name, fields });
    }
    Ok(products)
}

/// Read the listing collection. Listings carry no natural id; the
/// zero-based line position becomes one.
pub fn read_listings(path: impl AsRef<Path>) -> Result<Vec<ListingRecord>, Error> {
    let file = File::open(path)?;
    let mut listings = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let fields = parse_line(&line?, index + 1)?;
        listings.push(ListingRecord { id: index, fields });
    }
    Ok(listings)
}

/// Write one NDJSON line per matched product:
/// `{"product_name": <id>, "listing": [<original listing object>]}`.
///
/// The listing is a singleton list, not a scalar, keeping the shape open
/// to a multi-listing extension. Lines come out in result-map order.
pub fn write_results(
    path: impl AsRef<Path>,
    results: &MatchResults,
    listings: &[ListingRecord],
) -> Result<(), Error> {
    let mut out = BufWriter::new(File::create(path)?);
    for (product, hit) in results {
        let listing = listings
            .get(hit.listing)
            .ok_or(Error::UnknownListing { id: hit.listing })?;
        let line = json!({
            "product_name": product,
            "listing": [&listing.fields],
        });
        serde_json::to_writer(&mut out, &line)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
