use super::*;
use std::net::Ipv4Addr;

fn ip(n: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(10, 0, 0, n))
}

#[test]
fn per_client_allows_up_to_limit() {
    let rl = RateLimiter::new();
    let client = ip(1);
    let now = Instant::now();

    for i in 0..DEFAULT_PER_CLIENT_LIMIT {
        assert!(rl.check_and_record_at(client, now).is_ok(), "request {i} should succeed");
    }
    assert!(matches!(
        rl.check_and_record_at(client, now),
        Err(RateLimitError::PerClientExceeded { .. })
    ));
}

#[test]
fn global_allows_up_to_limit() {
    let rl = RateLimiter::new();
    let now = Instant::now();

    // Use distinct clients to avoid hitting per-client limit first.
    for i in 0..DEFAULT_GLOBAL_LIMIT {
        assert!(
            rl.check_and_record_at(ip(u8::try_from(i).unwrap()), now).is_ok(),
            "request {i} should succeed"
        );
    }
    assert!(matches!(
        rl.check_and_record_at(ip(200), now),
        Err(RateLimitError::GlobalExceeded { .. })
    ));
}

#[test]
fn window_expiry_allows_new_requests() {
    let rl = RateLimiter::new();
    let client = ip(1);
    let start = Instant::now();

    // Fill up per-client limit.
    for _ in 0..DEFAULT_PER_CLIENT_LIMIT {
        rl.check_and_record_at(client, start).unwrap();
    }
    assert!(rl.check_and_record_at(client, start).is_err());

    // After the window passes, requests should succeed again.
    let after_window = start + Duration::from_secs(DEFAULT_PER_CLIENT_WINDOW_SECS) + Duration::from_millis(1);
    assert!(rl.check_and_record_at(client, after_window).is_ok());
}

#[test]
fn distinct_clients_do_not_interfere() {
    let rl = RateLimiter::new();
    let now = Instant::now();

    // Fill up client A.
    for _ in 0..DEFAULT_PER_CLIENT_LIMIT {
        rl.check_and_record_at(ip(1), now).unwrap();
    }
    assert!(rl.check_and_record_at(ip(1), now).is_err());

    // Client B should still be able to make requests.
    assert!(rl.check_and_record_at(ip(2), now).is_ok());
}
