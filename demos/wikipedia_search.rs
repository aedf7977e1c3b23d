//! Reactive title search against an in-memory stand-in for the Wikipedia
//! search API.
//!
//! Keystrokes are folded into a query and debounced; each query becomes a
//! request answered on a worker thread, the JSON body is decoded and the
//! first five titles are printed once the trigger fired.
//!
//! ```sh
//! RUST_LOG=rxtraining=debug cargo run --example wikipedia_search
//! ```

use std::{collections::HashMap, sync::Arc, thread};

use rxtraining::{prelude::*, snippet::snippet};
use serde::{de::DeserializeOwned, Deserialize};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct Response {
  query: Query,
}

#[derive(Debug, Deserialize)]
struct Query {
  search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
  title: String,
}

/// Status code and body of an answered request.
type HttpResponse = (u16, String);

const SEARCH_URL: &str =
  "https://en.wikipedia.org/w/api.php?action=query&format=json&list=search&srsearch=";

fn query_to_url(query: &str) -> Option<String> {
  let valid = !query.is_empty() && query.chars().all(|c| c.is_ascii_alphanumeric());
  valid.then(|| format!("{SEARCH_URL}{query}"))
}

fn ok_response(response: &HttpResponse) -> bool { (200..300).contains(&response.0) }

fn decode<T: DeserializeOwned>(body: &str) -> Option<T> { serde_json::from_str(body).ok() }

/// Canned responses, answered after a short latency on a worker thread.
#[derive(Clone)]
struct Http {
  responses: Arc<HashMap<String, HttpResponse>>,
  latency: Duration,
}

impl Http {
  fn get(&self, url: String) -> BoxOp<HttpResponse, RxError> {
    let http = self.clone();
    observable::create(move |mut observer: BoxedObserver<'static, HttpResponse, RxError>| {
      tracing::debug!(%url, "request sent");
      thread::spawn(move || {
        thread::sleep(http.latency);
        match http.responses.get(&url) {
          Some(response) => {
            observer.next(response.clone());
            observer.complete();
          }
          None => observer.error(RxError::Fetch { status: 404 }),
        }
      });
    })
    .box_it()
  }
}

fn search_for_title(http: Http, query: String) -> BoxOp<String, RxError> {
  observable::of(query)
    .map_err(RxError::from)
    .map(|query| query_to_url(&query))
    .flat_map(|url| observable::of_option(url).map_err(RxError::from))
    .flat_map(move |url| http.get(url))
    .filter(ok_response)
    .map(|(_, body)| decode::<Response>(&body))
    .flat_map(|response| observable::of_option(response).map_err(RxError::from))
    .flat_map(|response| observable::from_iter(response.query.search).map_err(RxError::from))
    .take(5)
    .map(|hit| hit.title)
    .box_it()
}

fn canned_web() -> Http {
  let body = |titles: &[&str]| {
    let search: Vec<_> = titles
      .iter()
      .map(|t| serde_json::json!({ "title": t }))
      .collect();
    serde_json::json!({ "query": { "search": search } }).to_string()
  };
  let responses = [
    (
      "swift",
      body(&[
        "Swift (programming language)",
        "Taylor Swift",
        "Swift",
        "Suzuki Swift",
        "Swift (bird)",
        "SWIFT",
      ]),
    ),
    ("bmw", body(&["BMW", "BMW M3", "BMW 3 Series"])),
  ]
  .into_iter()
  .map(|(query, body)| (format!("{SEARCH_URL}{query}"), (200, body)))
  .collect();

  Http {
    responses: Arc::new(responses),
    latency: Duration::from_millis(200),
  }
}

fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let scheduler = SerialScheduler::new()?;
  let http = canned_web();

  snippet("Wikipedia search", move || {
    let c_http = http.clone();
    let first_search = of_sequence!("s", "w", "i", "f", "t")
      .map_err(RxError::from)
      .scan(String::new(), |query, key| query + key)
      .debounce(Duration::from_millis(500), scheduler)
      .flat_map(move |query| search_for_title(c_http.clone(), query));
    let second_search = search_for_title(http, "bmw".into());
    let mut trigger: PublishSubject<i32, RxError> = PublishSubject::default();

    first_search
      .merge(second_search)
      .with_latest_from(trigger.clone())
      .map(|(title, _)| title)
      .subscribe_all(
        |title| println!("{title}"),
        |err| println!("search failed: {err}"),
        || println!("Completed"),
      );

    trigger.next(1);
    thread::sleep(Duration::from_secs(2));
  });
  Ok(())
}
