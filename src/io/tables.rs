// src/io/tables.rs

//! The three input tables: item master, site items and daily usage.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LoadError;

pub const ITEMS_FILE: &str = "items.csv";
pub const SITE_ITEMS_FILE: &str = "site_items.csv";
pub const USAGE_FILE: &str = "usage.csv";

pub const DEFAULT_MIN_ORDER_QTY: u32 = 1;
pub const DEFAULT_LEAD_TIME_DAYS: u32 = 7;

/// Row of `items.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub item_id: String,
    pub unit_cost: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Row of `site_items.csv`. Missing policy columns take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteItemRecord {
    pub site_id: String,
    pub item_id: String,
    pub current_par: u32,
    #[serde(default)]
    pub min_order_qty: Option<u32>,
    #[serde(default)]
    pub lead_time_days: Option<u32>,
}

impl SiteItemRecord {
    pub fn min_order_qty(&self) -> u32 {
        self.min_order_qty.unwrap_or(DEFAULT_MIN_ORDER_QTY)
    }

    pub fn lead_time_days(&self) -> u32 {
        self.lead_time_days.unwrap_or(DEFAULT_LEAD_TIME_DAYS)
    }
}

/// Row of `usage.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub site_id: String,
    pub item_id: String,
    pub day: NaiveDate,
    pub qty: f64,
}

/// All three tables, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub items: Vec<ItemRecord>,
    pub site_items: Vec<SiteItemRecord>,
    pub usage: Vec<UsageRecord>,
}

impl Dataset {
    /// Reads `items.csv`, `site_items.csv` and `usage.csv` from `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self, LoadError> {
        let items: Vec<ItemRecord> = read_table(open(&dir.join(ITEMS_FILE))?, "items")?;
        let site_items: Vec<SiteItemRecord> =
            read_table(open(&dir.join(SITE_ITEMS_FILE))?, "site_items")?;
        let usage: Vec<UsageRecord> = read_table(open(&dir.join(USAGE_FILE))?, "usage")?;

        debug!(
            dir = %dir.display(),
            items = items.len(),
            site_items = site_items.len(),
            usage = usage.len(),
            "loaded tables"
        );

        Ok(Self {
            items,
            site_items,
            usage,
        })
    }

    /// Parses the tables from in-memory CSV readers.
    pub fn from_readers<I: Read, S: Read, U: Read>(
        items: I,
        site_items: S,
        usage: U,
    ) -> Result<Self, LoadError> {
        Ok(Self {
            items: read_table(items, "items")?,
            site_items: read_table(site_items, "site_items")?,
            usage: read_table(usage, "usage")?,
        })
    }

    /// Writes the three tables into `dir`, replacing existing files.
    pub fn write_dir(&self, dir: &Path) -> Result<(), LoadError> {
        std::fs::create_dir_all(dir).map_err(|source| LoadError::Io {
            path: dir.display().to_string(),
            source,
        })?;

        write_table(create(&dir.join(ITEMS_FILE))?, "items", &self.items)?;
        write_table(
            create(&dir.join(SITE_ITEMS_FILE))?,
            "site_items",
            &self.site_items,
        )?;
        write_table(create(&dir.join(USAGE_FILE))?, "usage", &self.usage)?;
        Ok(())
    }

    /// Restricts site items and usage to one site. The item master is shared.
    pub fn for_site(&self, site_id: &str) -> Self {
        Self {
            items: self.items.clone(),
            site_items: self
                .site_items
                .iter()
                .filter(|row| row.site_id == site_id)
                .cloned()
                .collect(),
            usage: self
                .usage
                .iter()
                .filter(|row| row.site_id == site_id)
                .cloned()
                .collect(),
        }
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn create(path: &Path) -> Result<File, LoadError> {
    File::create(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn read_table<R: Read, T: for<'de> Deserialize<'de>>(
    reader: R,
    table: &'static str,
) -> Result<Vec<T>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    rdr.deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|source| LoadError::Csv { table, source })
}

fn write_table<W: Write, T: Serialize>(
    writer: W,
    table: &'static str,
    rows: &[T],
) -> Result<(), LoadError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)
            .map_err(|source| LoadError::Csv { table, source })?;
    }
    wtr.flush().map_err(|source| LoadError::Io {
        path: table.to_string(),
        source,
    })
}
