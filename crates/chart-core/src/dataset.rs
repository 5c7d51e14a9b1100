// File: crates/chart-core/src/dataset.rs
// Summary: Typed records for the TV energy and spot price datasets, plus category counting.

use std::collections::HashMap;

use crate::error::Result;
use crate::schema::{Column, Measure, Schema, Table};
use crate::source::DataSource;

/// Average energy per screen technology for 55" TVs (bar chart).
pub const TECH_55_INCH: &str = "Ex5_TV_energy_55inchtv_byScreenType.csv";
/// Average energy per screen technology across all sizes (donut chart).
pub const TECH_ALL_SIZES: &str = "Ex5_TV_energy_Allsizes_byScreenType.csv";
/// One row per TV model (scatter plot, donut counts).
pub const TV_MODELS: &str = "Ex5_TV_energy.csv";
/// Yearly electricity spot prices per region (line chart).
pub const SPOT_PRICES: &str = "Ex5_ARE_Spot_Prices.csv";

const SCREEN_TECH: &str = "Screen_Tech";
const MEAN_ENERGY: &str = "Mean(Labelled energy consumption (kWh/year))";

/// Fetch a dataset and apply its schema.
pub fn load_table(source: &dyn DataSource, name: &str, schema: &Schema) -> Result<Table> {
    let text = source.fetch(name)?;
    Table::parse(name, &text, schema)
}

#[derive(Clone, Debug, PartialEq)]
pub struct TechEnergy {
    pub technology: String,
    pub energy: Measure,
}

impl TechEnergy {
    pub fn schema() -> Schema {
        Schema::new([Column::text(SCREEN_TECH), Column::number(MEAN_ENERGY)])
    }

    pub fn from_table(table: &Table) -> Vec<Self> {
        table
            .records()
            .map(|r| Self { technology: r.text(SCREEN_TECH).to_string(), energy: r.measure(MEAN_ENERGY) })
            .collect()
    }

    pub fn load(source: &dyn DataSource, name: &str) -> Result<Vec<Self>> {
        Ok(Self::from_table(&load_table(source, name, &Self::schema())?))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TvModel {
    pub brand: String,
    pub screen_tech: String,
    pub screen_size: Measure,
    pub star_rating: Measure,
    pub energy: Measure,
}

impl TvModel {
    pub fn schema() -> Schema {
        Schema::new([
            Column::text("brand"),
            Column::text("screen_tech"),
            Column::number("screensize"),
            Column::number("star2"),
            Column::number("energy_consumpt"),
        ])
    }

    pub fn from_table(table: &Table) -> Vec<Self> {
        table
            .records()
            .map(|r| Self {
                brand: r.text("brand").to_string(),
                screen_tech: r.text("screen_tech").to_string(),
                screen_size: r.measure("screensize"),
                star_rating: r.measure("star2"),
                energy: r.measure("energy_consumpt"),
            })
            .collect()
    }

    pub fn load(source: &dyn DataSource) -> Result<Vec<Self>> {
        Ok(Self::from_table(&load_table(source, TV_MODELS, &Self::schema())?))
    }
}

/// Price regions of the spot price dataset that can be toggled on the line chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Qld,
    Nsw,
    Vic,
    Sa,
    Tas,
    Snowy,
}

impl Region {
    pub const ALL: [Region; 6] = [Region::Qld, Region::Nsw, Region::Vic, Region::Sa, Region::Tas, Region::Snowy];

    pub fn code(self) -> &'static str {
        match self {
            Region::Qld => "QLD",
            Region::Nsw => "NSW",
            Region::Vic => "VIC",
            Region::Sa => "SA",
            Region::Tas => "TAS",
            Region::Snowy => "Snowy",
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Region::Qld => "Queensland ($ per megawatt hour)",
            Region::Nsw => "New South Wales ($ per megawatt hour)",
            Region::Vic => "Victoria ($ per megawatt hour)",
            Region::Sa => "South Australia ($ per megawatt hour)",
            Region::Tas => "Tasmania ($ per megawatt hour)",
            Region::Snowy => "Snowy ($ per megawatt hour)",
        }
    }

    /// Case-insensitive lookup by code.
    pub fn from_code(code: &str) -> Option<Region> {
        Self::ALL.into_iter().find(|r| r.code().eq_ignore_ascii_case(code))
    }

    fn index(self) -> usize {
        self as usize
    }
}

const AVERAGE_PRICE: &str = "Average Price (notTas-Snowy)";

#[derive(Clone, Debug, PartialEq)]
pub struct SpotPrice {
    pub year: Measure,
    pub regions: [Measure; 6],
    pub average: Measure,
}

impl SpotPrice {
    pub fn schema() -> Schema {
        let mut columns = vec![Column::number("Year")];
        columns.extend(Region::ALL.iter().map(|r| Column::number(r.column())));
        columns.push(Column::number(AVERAGE_PRICE));
        Schema::new(columns)
    }

    pub fn from_table(table: &Table) -> Vec<Self> {
        table
            .records()
            .map(|r| Self {
                year: r.measure("Year"),
                regions: Region::ALL.map(|region| r.measure(region.column())),
                average: r.measure(AVERAGE_PRICE),
            })
            .collect()
    }

    pub fn load(source: &dyn DataSource) -> Result<Vec<Self>> {
        Ok(Self::from_table(&load_table(source, SPOT_PRICES, &Self::schema())?))
    }

    pub fn region(&self, region: Region) -> &Measure {
        &self.regions[region.index()]
    }
}

/// Count rows per category in one pass, keeping first-seen order.
pub fn count_by<'a, I>(keys: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    for key in keys {
        match index.get(key) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(key, order.len());
                order.push((key.to_string(), 1));
            }
        }
    }
    order
}

/// Technology summary joined with the number of models observed for it.
#[derive(Clone, Debug, PartialEq)]
pub struct TechShare {
    pub technology: String,
    pub energy: Measure,
    pub count: usize,
}

/// Attach counts to summary rows by technology; absent technologies count zero.
pub fn merge_counts(rows: Vec<TechEnergy>, counts: &[(String, usize)]) -> Vec<TechShare> {
    rows.into_iter()
        .map(|row| {
            let count = counts.iter().find(|(k, _)| *k == row.technology).map_or(0, |(_, c)| *c);
            TechShare { technology: row.technology, energy: row.energy, count }
        })
        .collect()
}
