use serde_json::json;
use travel_core::{Config, ServiceId, WeatherApiProvider};
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "test-key";

fn provider(server: &MockServer) -> WeatherApiProvider {
    let mut cfg = Config::default();
    cfg.upsert_api_key(ServiceId::Weather, KEY.to_string());
    cfg.set_base_url(ServiceId::Weather, server.uri());
    WeatherApiProvider::from_config(&cfg)
}

async fn expect_no_requests(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn current_weather_is_flattened() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("key", KEY))
        .and(query_param("q", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "location": { "name": "Paris", "country": "France" },
            "current": {
                "temp_c": 18.5,
                "condition": { "text": "Partly cloudy" },
                "humidity": 60,
                "wind_kph": 12.0
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let value = provider(&server).get_current_weather("Paris").await.to_value();

    assert_eq!(
        value,
        json!({
            "status": "success",
            "location": "Paris",
            "country": "France",
            "temperature_c": 18.5,
            "condition": "Partly cloudy",
            "humidity": 60,
            "wind_kph": 12.0
        })
    );
}

#[tokio::test]
async fn missing_nested_fields_become_null() {
    let server = MockServer::start().await;
    Mock::given(path("/current.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "location": { "name": "Reykjavik" },
            "current": { "temp_c": 3.0 }
        })))
        .mount(&server)
        .await;

    let value = provider(&server).get_current_weather("Reykjavik").await.to_value();

    assert_eq!(value["status"], "success");
    assert_eq!(value["location"], "Reykjavik");
    assert_eq!(value["temperature_c"], 3.0);
    for field in ["country", "condition", "humidity", "wind_kph"] {
        assert!(value[field].is_null(), "{field} should be null");
    }
}

#[tokio::test]
async fn forecast_days_out_of_range_make_no_request() {
    let server = MockServer::start().await;
    expect_no_requests(&server).await;

    let value = provider(&server).get_weather_forecast("Tokyo", 11).await.to_value();

    assert_eq!(
        value,
        json!({ "status": "error", "error": "Forecast days must be between 1 and 10" })
    );
}

#[tokio::test]
async fn missing_key_makes_no_request() {
    let server = MockServer::start().await;
    expect_no_requests(&server).await;

    let mut cfg = Config::default();
    cfg.set_base_url(ServiceId::Weather, server.uri());
    let weather = WeatherApiProvider::from_config(&cfg);

    let current = weather.get_current_weather("Paris").await;
    let forecast = weather.get_weather_forecast("Paris", 3).await;

    assert_eq!(current.error_message(), Some("Missing API key"));
    assert_eq!(forecast.error_message(), Some("Missing API key"));
}

#[tokio::test]
async fn forecast_keeps_upstream_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("q", "Tokyo"))
        .and(query_param("days", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "location": { "name": "Tokyo", "country": "Japan" },
            "forecast": { "forecastday": [
                { "date": "2026-10-18", "day": {
                    "avgtemp_c": 19.2, "maxwind_kph": 14.4,
                    "condition": { "text": "Sunny" }, "daily_chance_of_rain": 0 } },
                { "date": "2026-10-19", "day": {
                    "avgtemp_c": 17.0, "maxwind_kph": 22.3,
                    "condition": { "text": "Patchy rain nearby" } } }
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let value = provider(&server).get_weather_forecast("Tokyo", 2).await.to_value();

    assert_eq!(
        value,
        json!({
            "status": "success",
            "location": "Tokyo",
            "country": "Japan",
            "forecast": [
                { "date": "2026-10-18", "avg_temp_c": 19.2, "condition": "Sunny",
                  "max_wind_kph": 14.4, "chance_of_rain": 0 },
                { "date": "2026-10-19", "avg_temp_c": 17.0, "condition": "Patchy rain nearby",
                  "max_wind_kph": 22.3, "chance_of_rain": null }
            ]
        })
    );
}

#[tokio::test]
async fn upstream_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(path("/current.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 1006, "message": "No matching location found." }
        })))
        .mount(&server)
        .await;

    let result = provider(&server).get_current_weather("Atlantis").await;
    let message = result.error_message().expect("error envelope");

    assert!(message.starts_with("WeatherAPI request failed with status 400"), "{message}");
    assert!(message.contains("No matching location found."));
}

#[tokio::test]
async fn malformed_body_is_reported() {
    let server = MockServer::start().await;
    Mock::given(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = provider(&server).get_weather_forecast("Tokyo", 3).await;

    assert!(result.error_message().unwrap().starts_with("Failed to parse WeatherAPI JSON"));
}

#[tokio::test]
async fn repeated_calls_hit_upstream_each_time() {
    let server = MockServer::start().await;
    Mock::given(path("/current.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "location": { "name": "Paris", "country": "France" }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let weather = provider(&server);
    let first = weather.get_current_weather("Paris").await;
    let second = weather.get_current_weather("Paris").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn location_is_sent_verbatim() {
    let server = MockServer::start().await;
    Mock::given(path("/current.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    provider(&server).get_current_weather("  Paris ").await;

    let requests = server.received_requests().await.expect("recording enabled");
    let sent: Vec<String> = requests[0]
        .url
        .query_pairs()
        .filter(|(name, _)| name == "q")
        .map(|(_, value)| value.into_owned())
        .collect();
    assert_eq!(sent, vec!["  Paris ".to_string()]);
}

#[tokio::test]
async fn fractional_humidity_passes_through() {
    let server = MockServer::start().await;
    Mock::given(path("/current.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "location": { "name": "Lima" },
            "current": { "temp_c": 21.0, "humidity": 60.5, "wind_kph": "calm" }
        })))
        .mount(&server)
        .await;

    let value = provider(&server).get_current_weather("Lima").await.to_value();

    assert_eq!(value["status"], "success");
    assert_eq!(value["humidity"], json!(60.5));
    assert_eq!(value["wind_kph"], json!(null));
    assert_eq!(value["temperature_c"], json!(21.0));
}
