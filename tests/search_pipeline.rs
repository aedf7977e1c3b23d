//! The reactive title search: keystrokes are debounced into queries, each
//! query is turned into a request, the response is decoded and at most five
//! titles come out. The network is a canned response table.

use std::{
  collections::HashMap,
  sync::{
    atomic::{AtomicBool, Ordering},
    mpsc, Arc, Mutex,
  },
  thread,
};

use rxtraining::prelude::*;
use serde::{de::DeserializeOwned, Deserialize};

#[derive(Debug, Deserialize)]
struct Response {
  query: Query,
}

#[derive(Debug, Deserialize)]
struct Query {
  search: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
  title: String,
}

type Fetched = (u16, String);

const SEARCH_URL: &str =
  "https://en.wikipedia.org/w/api.php?action=query&format=json&list=search&srsearch=";

fn query_to_url(query: &str) -> Option<String> {
  let valid = !query.is_empty() && query.chars().all(|c| c.is_ascii_alphanumeric());
  valid.then(|| format!("{SEARCH_URL}{query}"))
}

fn ok_response(response: &Fetched) -> bool { (200..300).contains(&response.0) }

fn decode<T: DeserializeOwned>(body: &str) -> Option<T> { serde_json::from_str(body).ok() }

fn titles_body(titles: &[&str]) -> String {
  let search: Vec<_> = titles
    .iter()
    .map(|t| serde_json::json!({ "title": t }))
    .collect();
  serde_json::json!({ "query": { "search": search } }).to_string()
}

/// Answers requests from a fixed table. A URL missing from the table fails
/// the request with a 404.
#[derive(Clone, Default)]
struct FakeWeb {
  responses: Arc<HashMap<String, Fetched>>,
  threaded: bool,
}

impl FakeWeb {
  fn new(responses: impl IntoIterator<Item = (&'static str, Fetched)>) -> Self {
    let responses = responses
      .into_iter()
      .map(|(query, response)| (format!("{SEARCH_URL}{query}"), response))
      .collect();
    FakeWeb { responses: Arc::new(responses), threaded: false }
  }

  fn threaded(mut self) -> Self {
    self.threaded = true;
    self
  }

  fn fetch(&self, url: String) -> BoxOp<Fetched, RxError> {
    let web = self.clone();
    observable::create(move |mut observer: BoxedObserver<'static, Fetched, RxError>| {
      let cancelled = Arc::new(AtomicBool::new(false));
      let c_cancelled = cancelled.clone();
      let respond = move || {
        if c_cancelled.load(Ordering::SeqCst) {
          return;
        }
        match web.responses.get(&url) {
          Some(response) => {
            observer.next(response.clone());
            observer.complete();
          }
          None => observer.error(RxError::Fetch { status: 404 }),
        }
      };
      if web.threaded {
        thread::spawn(respond);
      } else {
        respond();
      }
      ClosureSubscription(move || cancelled.store(true, Ordering::SeqCst))
    })
    .box_it()
  }
}

fn search_for_title(web: FakeWeb, query: String) -> BoxOp<String, RxError> {
  observable::of(query)
    .map_err(RxError::from)
    .map(|query| query_to_url(&query))
    .flat_map(|url| observable::of_option(url).map_err(RxError::from))
    .flat_map(move |url| web.fetch(url))
    .filter(ok_response)
    .map(|(_, body)| decode::<Response>(&body))
    .flat_map(|response| observable::of_option(response).map_err(RxError::from))
    .flat_map(|response| observable::from_iter(response.query.search).map_err(RxError::from))
    .take(5)
    .map(|page| page.title)
    .box_it()
}

#[derive(Default)]
struct Outcome {
  titles: Vec<String>,
  error: Option<RxError>,
  completed: bool,
}

fn run(source: BoxOp<String, RxError>) -> Arc<Mutex<Outcome>> {
  let outcome = Arc::new(Mutex::new(Outcome::default()));
  let (on_next, on_error, on_complete) = (outcome.clone(), outcome.clone(), outcome.clone());
  source.subscribe_all(
    move |title| on_next.lock().unwrap().titles.push(title),
    move |err| on_error.lock().unwrap().error = Some(err),
    move || on_complete.lock().unwrap().completed = true,
  );
  outcome
}

fn swift_web() -> FakeWeb {
  FakeWeb::new([
    (
      "swift",
      (
        200,
        titles_body(&[
          "Swift",
          "Taylor Swift",
          "Swift (bird)",
          "SWIFT",
          "Swift Current",
          "Swiftlet",
          "Swift River",
        ]),
      ),
    ),
    ("bmw", (200, titles_body(&["BMW", "BMW M3"]))),
    ("down", (503, String::new())),
    ("garbage", (200, "{ not json".to_string())),
  ])
}

#[test]
fn at_most_five_titles() {
  let outcome = run(search_for_title(swift_web(), "swift".into()));
  let outcome = outcome.lock().unwrap();
  assert_eq!(
    outcome.titles,
    vec!["Swift", "Taylor Swift", "Swift (bird)", "SWIFT", "Swift Current"]
  );
  assert!(outcome.completed);
  assert!(outcome.error.is_none());
}

#[test]
fn failed_status_is_skipped() {
  let outcome = run(search_for_title(swift_web(), "down".into()));
  let outcome = outcome.lock().unwrap();
  assert!(outcome.titles.is_empty());
  assert!(outcome.completed);
}

#[test]
fn undecodable_body_is_skipped() {
  let outcome = run(search_for_title(swift_web(), "garbage".into()));
  let outcome = outcome.lock().unwrap();
  assert!(outcome.titles.is_empty());
  assert!(outcome.completed);
}

#[test]
fn invalid_query_never_fetches() {
  let outcome = run(search_for_title(FakeWeb::default(), "two words".into()));
  let outcome = outcome.lock().unwrap();
  assert!(outcome.titles.is_empty());
  assert!(outcome.completed);
  assert!(outcome.error.is_none());
}

#[test]
fn unreachable_url_fails() {
  let outcome = run(search_for_title(swift_web(), "nothing".into()));
  let outcome = outcome.lock().unwrap();
  assert_eq!(outcome.error, Some(RxError::Fetch { status: 404 }));
  assert!(!outcome.completed);
}

#[test]
fn strict_decode_reports_the_error() {
  let web = swift_web();
  let source = observable::of(format!("{SEARCH_URL}garbage"))
    .map_err(RxError::from)
    .flat_map(move |url| web.fetch(url))
    .flat_map(|(_, body)| {
      observable::of_result(
        serde_json::from_str::<Response>(&body).map_err(|e| RxError::Decode(e.to_string())),
      )
    })
    .map(|response| response.query.search.len().to_string())
    .box_it();

  let outcome = run(source);
  let outcome = outcome.lock().unwrap();
  assert!(matches!(outcome.error, Some(RxError::Decode(_))));
}

#[test]
fn debounced_keystrokes_merged_with_a_second_search() {
  let web = swift_web();
  let scheduler = TestScheduler::default();
  let mut keystrokes: PublishSubject<&'static str, RxError> = PublishSubject::default();
  let mut trigger: PublishSubject<i32, RxError> = PublishSubject::default();

  let c_web = web.clone();
  let first_search = keystrokes
    .clone()
    .scan(String::new(), |query, key| query + key)
    .debounce(Duration::from_millis(300), scheduler.clone())
    .flat_map(move |query| search_for_title(c_web.clone(), query));
  let second_search = search_for_title(web, "bmw".into());

  let (titles, errors) = (Arc::new(Mutex::new(vec![])), Arc::new(Mutex::new(vec![])));
  let (c_titles, c_errors) = (titles.clone(), errors.clone());
  first_search
    .merge(second_search)
    .with_latest_from(trigger.clone())
    .map(|(title, _)| title)
    .subscribe_all(
      move |title| c_titles.lock().unwrap().push(title),
      move |err| c_errors.lock().unwrap().push(err),
      || {},
    );

  // the second search answered before the trigger fired
  assert!(titles.lock().unwrap().is_empty());
  trigger.next(1);

  for key in ["s", "w", "i"] {
    keystrokes.next(key);
    scheduler.advance_by(Duration::from_millis(100));
  }
  keystrokes.next("f");
  keystrokes.next("t");
  assert!(titles.lock().unwrap().is_empty());

  scheduler.advance_by(Duration::from_millis(300));
  assert_eq!(
    *titles.lock().unwrap(),
    vec!["Swift", "Taylor Swift", "Swift (bird)", "SWIFT", "Swift Current"]
  );
  assert!(errors.lock().unwrap().is_empty());
}

#[test]
fn threaded_fetch() {
  let (tx, rx) = mpsc::channel();
  let tx = Mutex::new(tx);
  let c_tx = Mutex::new(tx.lock().unwrap().clone());
  search_for_title(swift_web().threaded(), "bmw".into())
    .collect::<Vec<_>>()
    .subscribe_all(
      move |titles| tx.lock().unwrap().send(Ok(titles)).unwrap(),
      move |err| c_tx.lock().unwrap().send(Err(err)).unwrap(),
      || {},
    );

  let titles = rx
    .recv_timeout(Duration::from_secs(5))
    .unwrap()
    .unwrap();
  assert_eq!(titles, vec!["BMW", "BMW M3"]);
}
