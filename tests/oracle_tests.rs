use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use broadside::core::resolver::{resolve, Engagement};
use broadside::player::oracle::{build_prompt, parse_reply};
use broadside::{
    BoardView, Coordinate, Fleet, Grid, HeuristicStrategy, OpponentStrategy, OracleClient,
    OracleStrategy, Orientation, StrategyError, SHIP_CATALOG,
};
use rand::{rngs::SmallRng, SeedableRng};

fn c(row: usize, col: usize) -> Coordinate {
    Coordinate::new(row, col)
}

/// Opposing grid with a hit at (0, 0) and a miss at (5, 5).
fn sample_view() -> BoardView {
    let mut fleet = Fleet::new(Grid::new(8)).unwrap();
    fleet.place_ship(&SHIP_CATALOG[0], c(0, 0), Orientation::Horizontal).unwrap();
    let mut rng = SmallRng::seed_from_u64(1);
    for at in [c(0, 0), c(5, 5)] {
        let mut eng = Engagement {
            defender: &mut fleet,
            attacker_advantage: None,
            defender_advantage: None,
            attacker_disabled: false,
        };
        resolve(&mut eng, at, &mut rng).unwrap();
    }
    BoardView::observe(&fleet, &[], None, false)
}

enum Reply {
    Text(&'static str),
    Slow(Duration),
    Fail,
}

struct MockClient {
    reply: Reply,
    calls: Arc<AtomicUsize>,
}

impl MockClient {
    fn new(reply: Reply) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                reply,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait::async_trait]
impl OracleClient for MockClient {
    async fn propose(&self, prompt: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(prompt.contains("Board:"));
        match &self.reply {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::Slow(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(r#"{"row": 3, "col": 3}"#.to_string())
            }
            Reply::Fail => anyhow::bail!("connection refused"),
        }
    }
}

#[test]
fn test_prompt_carries_grid() {
    let view = sample_view();
    let prompt = build_prompt(&view);
    assert!(prompt.contains("8x8"));
    assert!(prompt.contains(&view.render_grid()));
    assert!(prompt.contains("H O O O O O O O"));
}

#[test]
fn test_parse_reply_validation() {
    let view = sample_view();
    assert_eq!(parse_reply(r#"{"row": 2, "col": 6}"#, &view), Ok(c(2, 6)));
    assert_eq!(
        parse_reply("```json\n{\"row\": 1, \"col\": 0}\n```", &view),
        Ok(c(1, 0))
    );
    assert_eq!(parse_reply("```{\"row\": 4, \"col\": 4}```", &view), Ok(c(4, 4)));
    assert_eq!(
        parse_reply("row three please", &view),
        Err(StrategyError::OracleInvalidMove("malformed reply"))
    );
    assert_eq!(
        parse_reply(r#"{"row": -1, "col": 2}"#, &view),
        Err(StrategyError::OracleInvalidMove("negative coordinate"))
    );
    assert_eq!(
        parse_reply(r#"{"row": 8, "col": 0}"#, &view),
        Err(StrategyError::OracleInvalidMove("out of bounds"))
    );
    assert_eq!(
        parse_reply(r#"{"row": 5, "col": 5}"#, &view),
        Err(StrategyError::OracleInvalidMove("already fired"))
    );
}

#[tokio::test]
async fn test_valid_reply_is_used() {
    let (client, calls) = MockClient::new(Reply::Text(r#"{"row": 6, "col": 1}"#));
    let mut oracle = OracleStrategy::new(client, HeuristicStrategy::new(1));
    let view = sample_view();
    assert_eq!(oracle.next_move(&view).await, c(6, 1));
    assert_eq!(oracle.fallbacks(), 0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_bad_replies_fall_back() {
    let view = sample_view();
    let replies = [
        "not json at all",
        r#"{"row": 5, "col": 5}"#,
        r#"{"row": 0, "col": 99}"#,
        r#"{"row": -3, "col": 0}"#,
    ];
    for text in replies {
        let (client, calls) = MockClient::new(Reply::Text(text));
        let mut oracle = OracleStrategy::new(client, HeuristicStrategy::new(2));
        let at = oracle.next_move(&view).await;
        assert!(view.is_open(at), "{text}: fell back to closed cell {at}");
        assert_eq!(oracle.fallbacks(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

#[tokio::test]
async fn test_deadline_falls_back() {
    let (client, _) = MockClient::new(Reply::Slow(Duration::from_secs(2)));
    let mut oracle =
        OracleStrategy::new(client, HeuristicStrategy::new(3)).with_deadline(Duration::from_millis(20));
    let view = sample_view();
    let at = oracle.next_move(&view).await;
    assert!(view.is_open(at));
    assert_eq!(oracle.fallbacks(), 1);
}

#[tokio::test]
async fn test_transport_failure_falls_back() {
    let (client, _) = MockClient::new(Reply::Fail);
    let mut oracle = OracleStrategy::new(client, HeuristicStrategy::new(4));
    let view = sample_view();
    let at = oracle.next_move(&view).await;
    assert!(view.is_open(at));
    // the hit at (0, 0) is followed up rather than searched around
    assert!(at == c(1, 0) || at == c(0, 1));
    assert_eq!(oracle.fallbacks(), 1);
}
