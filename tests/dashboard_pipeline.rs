//! End-to-end checks of the load → aggregate → chart pipeline through the
//! public API.

use std::sync::Arc;

use threat_lens::charts::{ChartKind, Orientation};
use threat_lens::data::aggregate::{aggregate, aggregate_unchecked, TOP_COUNTRIES};
use threat_lens::data::loader::read_csv;
use threat_lens::{DashboardError, DashboardState, IncidentTable};

const HEADER: &str = "Country,Year,Attack Type,Target Industry,Financial Loss (in Million $),\
Number of Affected Users,Attack Source,Security Vulnerability Type,Defense Mechanism Used,\
Incident Resolution Time (in Hours)";

fn table_from(rows: &[&str]) -> IncidentTable {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    read_csv(text.as_bytes()).expect("valid CSV")
}

fn sample_table() -> IncidentTable {
    table_from(&[
        "China,2019,Phishing,Education,80.53,773169,Hacker Group,Unpatched Software,VPN,63",
        "China,2019,Ransomware,Retail,62.19,295961,Hacker Group,Unpatched Software,Firewall,71",
        "India,2017,Man-in-the-Middle,IT,38.65,605895,Hacker Group,Weak Passwords,VPN,20",
        "UK,2024,Ransomware,Telecommunications,41.44,659320,Nation-state,Social Engineering,AI-based Detection,7",
        "Germany,2018,Man-in-the-Middle,IT,74.41,810682,Insider,Social Engineering,VPN,68",
        "Germany,2017,Man-in-the-Middle,Retail,98.24,285201,Unknown,Social Engineering,Antivirus,25",
        "Germany,2016,DDoS,Telecommunications,33.26,431262,Insider,Unpatched Software,VPN,34",
        "France,2018,SQL Injection,Government,59.23,909991,Unknown,Social Engineering,Antivirus,66",
        "India,2016,Man-in-the-Middle,Banking,16.88,698249,Unknown,Social Engineering,VPN,47",
        "UK,2023,DDoS,Healthcare,69.14,685927,Hacker Group,Unpatched Software,Firewall,58",
        "USA,2015,SQL Injection,Banking,12.0,100000,Insider,Zero-day,Encryption,10",
        "Japan,2021,SQL Injection,IT,25.5,20000,Hacker Group,Weak Passwords,Firewall,30",
    ])
}

#[test]
fn phishing_pair_end_to_end() {
    let table = table_from(&[
        "US,2020,Phishing,IT,5,100,Insider,Weak Passwords,Firewall,2",
        "US,2021,Phishing,IT,3,50,Insider,Weak Passwords,Firewall,4",
    ]);
    let mut state = DashboardState::new(Arc::new(table), "Phishing").unwrap();
    let frame = state.select("Phishing").unwrap();

    let ChartKind::Bar(loss) = &frame.country_loss.kind else {
        panic!("country loss should be a bar chart");
    };
    assert_eq!(loss.labels, ["US"]);
    assert_eq!(loss.values, [8.0]);

    let ChartKind::Bar(sources) = &frame.attack_sources.kind else {
        panic!("attack sources should be a bar chart");
    };
    assert_eq!(sources.labels, ["Insider"]);
    assert_eq!(sources.values, [2.0]);

    let ChartKind::Bar(defenses) = &frame.defenses.kind else {
        panic!("defenses should be a bar chart");
    };
    assert_eq!(defenses.orientation, Orientation::Horizontal);
    assert_eq!(defenses.labels, ["Firewall"]);
    assert_eq!(defenses.values, [2.0]);

    let ChartKind::Histogram(hist) = &frame.resolution_time.kind else {
        panic!("resolution time should be a histogram");
    };
    assert_eq!(hist.values, [2.0, 4.0]);

    let ChartKind::Geo(map) = &frame.map.kind else {
        panic!("map should be a geo chart");
    };
    assert_eq!(map.locations, ["US", "US"]);
    assert_eq!(map.z, [100.0, 50.0]);
}

#[test]
fn filtered_rows_match_selection_for_every_attack_type() {
    let table = sample_table();
    for attack_type in table.attack_types() {
        let views = aggregate(&table, attack_type).unwrap();
        let expected: Vec<_> = table
            .records()
            .iter()
            .filter(|r| &r.attack_type == attack_type)
            .collect();
        assert_eq!(views.filtered, expected, "{attack_type}");

        let top = &views.by_country_loss_top10;
        let mut countries: Vec<&str> = views.filtered.iter().map(|r| r.country.as_str()).collect();
        countries.sort_unstable();
        countries.dedup();
        assert!(top.len() <= TOP_COUNTRIES);
        assert!(top.len() <= countries.len());
        assert!(top.windows(2).all(|w| w[0].total >= w[1].total));

        let source_total: usize = views.by_attack_source_count.iter().map(|g| g.count).sum();
        assert_eq!(source_total, views.filtered.len());

        let type_total: usize = views.by_attack_type_count.iter().map(|g| g.count).sum();
        assert_eq!(type_total, table.len());
    }
}

#[test]
fn attack_type_pie_ignores_selection() {
    let mut state = DashboardState::new(Arc::new(sample_table()), "SQL Injection").unwrap();
    let before = state.frame().attack_types.clone();
    state.select("DDoS").unwrap();
    assert_eq!(state.frame().attack_types, before);

    let ChartKind::Pie(pie) = &before.kind else {
        panic!("attack types should be a pie chart");
    };
    assert_eq!(pie.values.iter().sum::<f64>(), 12.0);
    assert_eq!(pie.labels[0], "Man-in-the-Middle");
}

#[test]
fn zero_match_selection_renders_empty_charts() {
    let table = sample_table();
    let views = aggregate_unchecked(&table, "Cryptojacking");

    assert!(views.filtered.is_empty());
    assert!(views.by_country_loss_top10.is_empty());
    assert!(views.by_attack_source_count.is_empty());
    assert!(views.by_defense_count.is_empty());
    assert!(views.resolution_time_values.is_empty());

    let hist = threat_lens::charts::builders::resolution_time_chart(&views.resolution_time_values);
    let ChartKind::Histogram(hist) = hist.kind else {
        panic!("expected histogram");
    };
    assert!(hist.bins.is_empty());
}

#[test]
fn unknown_selection_is_rejected_without_partial_update() {
    let mut state = DashboardState::new(Arc::new(sample_table()), "SQL Injection").unwrap();
    let before = state.frame().clone();

    let err = state.select("Cryptojacking").unwrap_err();
    assert!(matches!(err, DashboardError::InvalidSelection { .. }));
    assert_eq!(state.frame(), &before);
    assert_eq!(state.selection(), "SQL Injection");
}

#[test]
fn missing_default_attack_type_fails_startup() {
    let table = table_from(&["US,2020,Phishing,IT,5,100,Insider,Weak Passwords,Firewall,2"]);
    let err = DashboardState::new(Arc::new(table), "SQL Injection").unwrap_err();
    assert!(err.to_string().contains("SQL Injection"));
}

#[test]
fn frame_serializes_to_json() {
    let state = DashboardState::new(Arc::new(sample_table()), "SQL Injection").unwrap();
    let json = serde_json::to_value(state.frame()).unwrap();

    assert_eq!(json["selection"], "SQL Injection");
    assert_eq!(json["filtered_rows"], 3);
    assert_eq!(json["map"]["kind"]["type"], "geo");
    assert_eq!(json["defenses"]["kind"]["orientation"], "Horizontal");
}
