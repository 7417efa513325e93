//! Registration, match reports and rankings through the dispatcher

use crate::fixtures::{ChatFixture, ADMIN};
use chrono::Duration;
use table_ladder::utils::current_timestamp;

#[tokio::test]
async fn test_first_match_between_new_players() {
    let chat = ChatFixture::new();
    chat.register_all(&["alice", "bob"]).await;

    let report = chat.say("alice", "/played @bob 2-0").await;
    assert_eq!(
        report,
        "Rating updates from @alice 2-0 @bob:\n\
         @alice 1000 -> 1020\n\
         @bob 1000 -> 980\n\
         #games #alice_games #bob_games"
    );

    assert_eq!(chat.say("alice", "/my_rating").await, "Your rating is 1020 | 1 | 0.");
    assert_eq!(
        chat.say("alice", "/rating_of @bob").await,
        "bob's rating is 980 | 0 | 1."
    );
    assert_eq!(chat.say("alice", "/stats_vs @bob").await, "alice - 1 | 0 - bob");
    assert_eq!(chat.say("bob", "/stats_vs alice").await, "bob - 0 | 1 - alice");
}

#[tokio::test]
async fn test_ratings_follow_the_series() {
    let chat = ChatFixture::new();
    chat.register_all(&["alice", "bob"]).await;

    chat.say("alice", "/played @bob 2-0").await;
    let report = chat.say("alice", "/played @bob 1-0").await;
    assert!(report.contains("@alice 1020 -> 1029"), "{}", report);
    assert!(report.contains("@bob 980 -> 970"), "{}", report);

    // Reported by the loser this time
    chat.say("bob", "/played @alice 3-2").await;
    assert_eq!(chat.say("alice", "/stats_vs @bob").await, "alice - 2 | 1 - bob");
    assert_eq!(
        chat.say("bob", "/my_rating").await.split(" | ").nth(1),
        Some("1")
    );
}

#[tokio::test]
async fn test_rejected_reports_change_nothing() {
    let chat = ChatFixture::new();
    chat.register_all(&["alice", "bob"]).await;

    assert!(chat.say("alice", "/played @bob 2-2").await.contains("Draws"));
    assert!(chat
        .say("alice", "/played @bob 4-1")
        .await
        .contains("from 0 to 3"));
    assert_eq!(
        chat.say("alice", "/played @carol 2-0").await,
        "Seems @carol hasn't registered yet."
    );
    assert_eq!(
        chat.say("alice", "/played @alice 2-0").await,
        "Not sure that alice could play with themself"
    );

    assert_eq!(chat.say("alice", "/my_rating").await, "Your rating is 1000 | 0 | 0.");
    assert_eq!(
        chat.say("alice", "/stats_vs @bob").await,
        "Seems alice and bob haven't played against each other yet."
    );
}

#[tokio::test]
async fn test_registration_rules() {
    let chat = ChatFixture::new();

    assert_eq!(
        chat.whisper("alice", "/register_me").await,
        "Sorry, the registration is allowed only at the group Office Ping Pong."
    );
    assert_eq!(
        chat.say("alice", "/my_rating").await,
        "Seems @alice hasn't registered yet."
    );

    chat.register_all(&["alice"]).await;
    assert_eq!(
        chat.say("alice", "/register_me").await,
        "Seems you've already registered and your rating is 1000 | 0 | 0."
    );
    assert_eq!(
        chat.whisper("alice", "/register_me").await,
        "Seems you've already registered and your rating is 1000 | 0 | 0."
    );
}

#[tokio::test]
async fn test_only_admin_reports_outside_the_group() {
    let chat = ChatFixture::new();
    chat.register_all(&["alice", ADMIN]).await;

    assert!(chat
        .whisper("alice", "/played @boss 2-0")
        .await
        .starts_with("Sorry, reporting games is allowed only at the group"));

    let report = chat.whisper(ADMIN, "/played @alice 2-1").await;
    assert!(report.starts_with("Rating updates from @boss 2-1 @alice"));
}

#[tokio::test]
async fn test_delete_me_keeps_head_to_head() {
    let chat = ChatFixture::new();
    chat.register_all(&["alice", "bob"]).await;
    chat.say("bob", "/played @alice 3-1").await;

    assert_eq!(
        chat.say("alice", "/delete_me").await,
        "Sorry to see you go, @alice. Your rating is deleted from the top."
    );
    assert_eq!(
        chat.say("bob", "/rating_of @alice").await,
        "Seems @alice hasn't registered yet."
    );
    assert_eq!(chat.say("bob", "/stats_vs @alice").await, "bob - 1 | 0 - alice");

    // Coming back starts from scratch
    chat.register_all(&["alice"]).await;
    assert_eq!(chat.say("alice", "/my_rating").await, "Your rating is 1000 | 0 | 0.");
}

#[tokio::test]
async fn test_admin_overrides() {
    let chat = ChatFixture::new();

    assert_eq!(
        chat.say("alice", "/set_score @alice 1500 5 5").await,
        "Allowed only for boss"
    );
    assert_eq!(
        chat.whisper(ADMIN, "/set_score @alice 40 0 0").await,
        "Score should be higher than 40"
    );
    assert_eq!(
        chat.whisper(ADMIN, "/set_score @alice 1500 5 5").await,
        "@alice's rating = 1500 | 5 | 5 now."
    );
    assert_eq!(chat.say("alice", "/my_rating").await, "Your rating is 1500 | 5 | 5.");

    assert_eq!(
        chat.whisper(ADMIN, "/set_stats_vs @zed @amy 3 1").await,
        "So, now we have zed - 3 | 1 - amy"
    );
    assert_eq!(chat.say("amy", "/stats_vs @zed").await, "amy - 1 | 3 - zed");
    assert_eq!(
        chat.whisper(ADMIN, "/set_stats_vs @amy @amy 3 1").await,
        "Not sure that amy could play with themself"
    );
}

#[tokio::test]
async fn test_report_at_counter_limit() {
    let chat = ChatFixture::new();
    chat.register_all(&["alice", "bob"]).await;
    assert_eq!(
        chat.whisper(ADMIN, "/set_score @alice 1000 4294967295 0").await,
        "@alice's rating = 1000 | 4294967295 | 0 now."
    );

    let report = chat.say("alice", "/played @bob 2-0").await;
    assert!(report.contains("@alice 1000 -> 1020"), "{}", report);
    assert_eq!(
        chat.say("alice", "/my_rating").await,
        "Your rating is 1020 | 4294967295 | 0."
    );
}

#[tokio::test]
async fn test_top_lists_only_active_players() {
    let chat = ChatFixture::new();
    chat.register_all(&["alice", "bob", "carol"]).await;
    chat.say("alice", "/played @bob 2-0").await;

    // carol is the best player but has not played for a month
    chat.whisper(ADMIN, "/set_score @carol 2000 40 0").await;
    let month_ago = current_timestamp() - Duration::days(30);
    assert!(chat
        .store
        .inner()
        .set_last_modified("players_stats/carol", month_ago)
        .unwrap());

    assert_eq!(
        chat.say("bob", "/top").await,
        "Active Top\n\
         Player = Pts | W | L:\n\
         alice 🥇 = 1020 | 1 | 0\n\
         bob 🥈 = 980 | 0 | 1"
    );
}

#[tokio::test]
async fn test_top_breaks_ties_by_handle() {
    let chat = ChatFixture::new();
    chat.register_all(&["mia", "ann", "zoe", "bob"]).await;

    let top = chat.say("bob", "/top").await;
    let places: Vec<&str> = top
        .lines()
        .skip(2)
        .map(|line| line.split(' ').next().unwrap_or_default())
        .collect();
    assert_eq!(places, vec!["ann", "bob", "mia", "zoe"]);
    assert!(top.contains("mia 🥉"));
    assert!(top.ends_with("zoe = 1000 | 0 | 0"));
}

#[tokio::test]
async fn test_outage_is_reported_and_recovered() {
    let chat = ChatFixture::new();
    chat.register_all(&["alice", "bob"]).await;

    chat.store.set_down(true);
    for text in ["/top", "/my_rating", "/played @bob 1-0", "/register_me"] {
        assert_eq!(
            chat.say("alice", text).await,
            "Can't reach the records right now, please try again later.",
            "{}",
            text
        );
    }

    chat.store.set_down(false);
    assert_eq!(chat.say("alice", "/my_rating").await, "Your rating is 1000 | 0 | 0.");
}
