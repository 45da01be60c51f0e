use mgjson_core::{
    parse_mgjson_json, Config, Document, Interpolation, PropertyOptions, StreamOptions,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioInput {
    #[serde(default)]
    config: Option<Config>,
    properties: Vec<PropertyInput>,
    streams: Vec<StreamInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PropertyInput {
    name: String,
    value: serde_json::Value,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamInput {
    name: String,
    samples: Vec<[f64; 2]>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    interpolation: Option<Interpolation>,
}

fn build(name: &str) -> anyhow::Result<Document> {
    let input: ScenarioInput = mgjson_test_fixtures::scenarios::input(name)?;
    let mut doc = Document::with_config(input.config.unwrap_or_default());
    for p in input.properties {
        doc.add_property_with(
            p.name,
            p.value,
            PropertyOptions {
                display_name: p.display_name,
            },
        )?;
    }
    for s in input.streams {
        doc.add_stream_with(
            s.name,
            s.samples,
            StreamOptions {
                display_name: s.display_name,
                interpolation: s.interpolation,
            },
        )?;
    }
    Ok(doc)
}

#[test]
fn every_scenario_matches_its_golden_document() {
    for key in mgjson_test_fixtures::scenarios::keys() {
        let doc = build(&key).unwrap_or_else(|e| panic!("build scenario {key}: {e:#}"));
        let actual = doc.serialize().to_json_value().expect("render");
        let expected = mgjson_test_fixtures::scenarios::expected(&key).expect("golden");
        assert_eq!(actual, expected, "scenario {key} differs from golden document");
    }
}

#[test]
fn cats_and_temperature_renders_byte_for_byte() {
    let doc = build("cats-and-temperature").expect("build");
    let text = doc.to_json_string().expect("render");
    let golden = mgjson_test_fixtures::scenarios::expected_json("cats-and-temperature")
        .expect("golden text");
    assert_eq!(text, golden.trim_end());
}

#[test]
fn golden_documents_decode_and_re_encode_unchanged() {
    for key in mgjson_test_fixtures::scenarios::keys() {
        let golden = mgjson_test_fixtures::scenarios::expected_json(&key).expect("golden text");
        let doc = parse_mgjson_json(&golden).unwrap_or_else(|e| panic!("decode {key}: {e}"));
        let again = doc.serialize().to_json_value().expect("render");
        let expected = mgjson_test_fixtures::scenarios::expected(&key).expect("golden");
        assert_eq!(again, expected, "scenario {key} changed after a round trip");
    }
}

#[test]
fn bike_telemetry_streams_carry_expected_metadata() {
    let doc = build("bike-telemetry").expect("build");

    let speed = doc.stream("speed").expect("speed");
    assert_eq!(speed.sample_interval(), Some(0.5));
    assert_eq!(speed.interpolation(), Interpolation::Linear);
    assert_eq!(speed.display_name(), "Speed (km/h)");

    let hr = doc.stream("heartRate").expect("heartRate");
    assert_eq!(hr.sample_interval(), None);
    assert_eq!(hr.interpolation(), Interpolation::Hold);
    assert_eq!(hr.encoded_samples()[2].value, "+1250.750000000000000");

    let gear = doc.stream("gearShift").expect("gearShift");
    assert_eq!(gear.start_time(), -0.5);
    assert_eq!(gear.encoded_samples()[1].time, "1969-12-31T23:59:59.999Z");

    assert_eq!(doc.serialize().creator, "telemetry-export");
}
