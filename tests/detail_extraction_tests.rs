//! Detail page extraction against a captured vehicle page
use pdx_inventory_lib::domain::{VehicleDetails, VehicleSpecs};
use pdx_inventory_lib::infrastructure::parsing::{ContextualParser, DetailParseContext};
use pdx_inventory_lib::infrastructure::VehicleDetailParser;
use scraper::Html;

const SAMPLE_VEHICLE: &str = include_str!("fixtures/sample_vehicle.html");

fn ferrari() -> VehicleDetails {
    VehicleDetails {
        title: Some("2008 Ferrari F430".to_string()),
        price: Some("$172,500".to_string()),
        mileage: Some("23456".to_string()),
        vin: Some("ZFFEW58A580160000".to_string()),
        specs: Some(VehicleSpecs::from_iter([
            ("Exterior".to_string(), "Red".to_string()),
            ("Interior".to_string(), "Tan".to_string()),
        ])),
        description: Some("This Ferrari is awesome".to_string()),
    }
}

#[test]
fn sample_vehicle_page_extracts_every_field() {
    let parser = VehicleDetailParser::new().unwrap();
    assert_eq!(parser.extract_document(SAMPLE_VEHICLE), ferrari());
}

#[test]
fn contextual_parse_matches_direct_extraction() {
    let parser = VehicleDetailParser::new().unwrap();
    let html = Html::parse_document(SAMPLE_VEHICLE);
    let context = DetailParseContext::new("https://www.pdxmotors.com/inventory/ferrari/f430/1/");

    let details = parser.parse_with_context(&html, &context).unwrap();
    assert_eq!(details, parser.extract(&html));
}

#[test]
fn sample_vehicle_serializes_with_ordered_specs() {
    let parser = VehicleDetailParser::new().unwrap();
    let json = serde_json::to_value(parser.extract_document(SAMPLE_VEHICLE)).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "title": "2008 Ferrari F430",
            "price": "$172,500",
            "mileage": "23456",
            "vin": "ZFFEW58A580160000",
            "specs": {"Exterior": "Red", "Interior": "Tan"},
            "description": "This Ferrari is awesome"
        })
    );
}

#[test]
fn page_without_vehicle_markup_is_empty() {
    let parser = VehicleDetailParser::new().unwrap();
    let details = parser.extract_document("<html><head></head><body>Sold</body></html>");

    assert!(details.is_empty());
    assert_eq!(serde_json::to_string(&details).unwrap(), "{}");
}

#[test]
fn present_but_empty_elements_still_produce_keys() {
    let parser = VehicleDetailParser::new().unwrap();
    let details = parser.extract_document(
        r#"<h1 class="h4 title">   </h1>
           <meta property="og:description" content="   ">"#,
    );

    assert_eq!(details.title.as_deref(), Some(""));
    assert_eq!(details.description.as_deref(), Some(""));

    let details = parser.extract_document(r#"<meta property="og:description" content="">"#);
    assert_eq!(details.description, None);
}

#[test]
fn only_first_matching_spec_list_is_used() {
    let parser = VehicleDetailParser::new().unwrap();
    let details = parser.extract_document(
        r#"<dl class="vehicle-info"><div class="info-item"><dt>Doors</dt><dd>2</dd></div></dl>
           <dl class="vehicle-info"><div class="info-item"><dt>Seats</dt><dd>2</dd></div></dl>"#,
    );

    let specs = details.specs.unwrap();
    assert_eq!(specs.len(), 1);
    assert_eq!(specs.get("Doors"), Some("2"));
    assert_eq!(specs.get("Seats"), None);
}
