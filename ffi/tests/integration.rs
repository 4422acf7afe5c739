//! Drive the C surface end to end: build through FFI, execute with ureq
//! against the mock server, parse through FFI.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use heroiq_ffi::types::{FfiDataTag, FfiErrorCode, FfiHeroDetail, FfiHeroList, FfiHttpRequest, FfiHttpResponse};
use heroiq_ffi::*;

const TOKEN: &str = "ffi-token";

fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, TOKEN).await
        })
        .unwrap();
    });

    addr
}

fn text(s: *const c_char) -> String {
    unsafe { CStr::from_ptr(s) }.to_str().unwrap().to_string()
}

/// Play the host: run the request and return status plus body.
fn execute(req: *mut FfiHttpRequest) -> (u16, CString) {
    let url = text(unsafe { &*req }.path);
    heroiq_free_request(req);

    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();
    let mut response = agent.get(&url).call().expect("HTTP transport error");
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    (status, CString::new(body).unwrap())
}

#[test]
fn search_then_open_detail() {
    let addr = start_server();
    let base = CString::new(format!("http://{addr}")).unwrap();
    let token = CString::new(TOKEN).unwrap();
    let client = heroiq_client_new(base.as_ptr(), token.as_ptr());
    assert!(!client.is_null());

    // Search.
    let query = CString::new("spider").unwrap();
    let (status, body) = execute(heroiq_build_search(client, query.as_ptr()));
    let result = heroiq_parse_search(client, &FfiHttpResponse { status, body: body.as_ptr() });
    let r = unsafe { &*result };
    assert_eq!(r.error_code, FfiErrorCode::Ok);
    assert_eq!(r.data_tag, FfiDataTag::HeroList);
    let list = unsafe { &*(r.data as *const FfiHeroList) };
    assert_eq!(list.len, 1);
    let hit = unsafe { &*list.items };
    let id = CString::new(text(hit.id)).unwrap();
    assert_eq!(text(hit.name), "Spider-Man");
    heroiq_free_result(result);

    // Open the hit.
    let (status, body) = execute(heroiq_build_lookup(client, id.as_ptr()));
    let result = heroiq_parse_lookup(client, &FfiHttpResponse { status, body: body.as_ptr() });
    let r = unsafe { &*result };
    assert_eq!(r.error_code, FfiErrorCode::Ok);
    let hero = unsafe { &*(r.data as *const FfiHeroDetail) };
    assert_eq!(text(hero.id), "620");
    assert_eq!(text(hero.publisher), "Marvel Comics");
    assert!(hero.stats_len > 0);
    assert!(hero.biography.len > 0);
    heroiq_free_result(result);

    // Unknown id.
    let missing = CString::new("999999").unwrap();
    let (status, body) = execute(heroiq_build_lookup(client, missing.as_ptr()));
    let result = heroiq_parse_lookup(client, &FfiHttpResponse { status, body: body.as_ptr() });
    let r = unsafe { &*result };
    assert_eq!(r.error_code, FfiErrorCode::Http);
    assert_eq!(r.http_status, 404);
    heroiq_free_result(result);

    heroiq_client_free(client);
}
