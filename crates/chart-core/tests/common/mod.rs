// File: crates/chart-core/tests/common/mod.rs
// Purpose: Small in-memory datasets shared by the integration tests.
#![allow(dead_code)]

use wattchart_core::dataset::{SPOT_PRICES, TECH_55_INCH, TECH_ALL_SIZES, TV_MODELS};
use wattchart_core::MemorySource;

pub const TECH_HEADER: &str = "Screen_Tech,Mean(Labelled energy consumption (kWh/year))";

pub const SPOT_HEADER: &str = "Year,Queensland ($ per megawatt hour),New South Wales ($ per megawatt hour),\
Victoria ($ per megawatt hour),South Australia ($ per megawatt hour),Tasmania ($ per megawatt hour),\
Snowy ($ per megawatt hour),Average Price (notTas-Snowy)";

pub fn bars(rows: &[(&str, &str)]) -> MemorySource {
    let body: String = rows.iter().map(|(t, v)| format!("{t},{v}\n")).collect();
    MemorySource::new().with(TECH_55_INCH, format!("{TECH_HEADER}\n{body}"))
}

/// Donut inputs: summary rows plus one model row per counted technology.
pub fn donut(counts: &[(&str, usize)]) -> MemorySource {
    let summary: String = counts.iter().map(|(t, _)| format!("{t},200\n")).collect();
    let models: String = counts
        .iter()
        .flat_map(|(t, n)| (0..*n).map(move |i| format!("Brand{i},{t}\n")))
        .collect();
    MemorySource::new()
        .with(TECH_ALL_SIZES, format!("{TECH_HEADER}\n{summary}"))
        .with(TV_MODELS, format!("brand,screen_tech\n{models}"))
}

pub fn spot_prices() -> MemorySource {
    let body = "1999,30,28,26,40,,35,31\n2000,45,50,48,60,33,40,47.5\n2001,38,36,,55,31,37,41\n";
    MemorySource::new().with(SPOT_PRICES, format!("{SPOT_HEADER}\n{body}"))
}

pub fn tv_models() -> MemorySource {
    let body = "brand,screen_tech,screensize,star2,energy_consumpt\n\
Acme,LED,55,4.5,150\n\
Bolt,OLED,65,3,320\n\
Core,LCD,32,,90\n\
Dyne,LED,40,6,95.5\n";
    MemorySource::new().with(TV_MODELS, body)
}
