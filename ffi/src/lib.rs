//! C-ABI wrapper around `heroiq-core`.
//!
//! # Overview
//! Exposes search and lookup through `extern "C"` functions so the mobile
//! host can build requests, run them on its own networking stack, and hand
//! the responses back for decoding. The host never links an async runtime
//! and never sees JSON: results arrive as view-models ready to render.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `build_*` / `parse_*` mirror `HeroClient` 1:1. Parsing also applies the
//!   view-model projection, so the C side receives list rows and detail
//!   screens rather than raw records.
//! - A single `FfiHeroResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `heroiq_free_*` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;
use std::ptr;

use heroiq_core::http::HttpResponse;
use heroiq_core::{to_detail_view_model, to_view_models, ApiConfig, HeroClient};

use types::*;

/// Borrow a C string as UTF-8, replacing invalid sequences.
///
/// # Safety
/// `s` must be non-null and NUL-terminated.
unsafe fn read_str(s: *const c_char) -> String {
    unsafe { CStr::from_ptr(s) }.to_string_lossy().into_owned()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client bound to `base_url` that authenticates with `token`.
///
/// Returns null if either argument is null or if an internal panic occurs.
/// The caller must free the returned pointer with `heroiq_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn heroiq_client_new(base_url: *const c_char, token: *const c_char) -> *mut FfiHeroClient {
    catch_unwind(|| {
        if base_url.is_null() || token.is_null() {
            return ptr::null_mut();
        }
        let (url, token) = unsafe { (read_str(base_url), read_str(token)) };
        let client = HeroClient::new(ApiConfig::new(&url, &token));
        Box::into_raw(Box::new(FfiHeroClient { inner: client }))
    })
    .unwrap_or(ptr::null_mut())
}

/// Free a client created by `heroiq_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn heroiq_client_free(client: *mut FfiHeroClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build the request for a name search. `query` is sent as typed; encoding
/// happens here.
///
/// Returns null if `client` or `query` is null.
/// The caller must free the returned pointer with `heroiq_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn heroiq_build_search(client: *const FfiHeroClient, query: *const c_char) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || query.is_null() {
            return ptr::null_mut();
        }
        let client = unsafe { &*client };
        let query = unsafe { read_str(query) };
        FfiHttpRequest::from_core(client.inner.build_search(&query))
    })
    .unwrap_or(ptr::null_mut())
}

/// Build the request for a single hero by id.
///
/// Returns null if `client` or `id` is null.
#[unsafe(no_mangle)]
pub extern "C" fn heroiq_build_lookup(client: *const FfiHeroClient, id: *const c_char) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || id.is_null() {
            return ptr::null_mut();
        }
        let client = unsafe { &*client };
        let id = unsafe { read_str(id) };
        FfiHttpRequest::from_core(client.inner.build_lookup(&id))
    })
    .unwrap_or(ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { read_str(resp.body) }
    };
    HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    }
}

/// Parse the response to a search request.
///
/// Returns a result with `data_tag = HeroList` on success. A search with no
/// hits is a `Decode` error carrying the provider's message.
#[unsafe(no_mangle)]
pub extern "C" fn heroiq_parse_search(
    client: *const FfiHeroClient,
    response: *const FfiHttpResponse,
) -> *mut FfiHeroResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiHeroResult::null_arg("client");
        }
        if response.is_null() {
            return FfiHeroResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = ffi_response_to_core(unsafe { &*response });
        match client.inner.parse_search(resp) {
            Ok(result) => FfiHeroResult::ok_hero_list(to_view_models(&result)),
            Err(e) => FfiHeroResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiHeroResult::panic("panic in heroiq_parse_search"))
}

/// Parse the response to a lookup request.
///
/// Returns a result with `data_tag = HeroDetail` on success. An unknown id
/// is an `Http` error with `http_status = 404`.
#[unsafe(no_mangle)]
pub extern "C" fn heroiq_parse_lookup(
    client: *const FfiHeroClient,
    response: *const FfiHttpResponse,
) -> *mut FfiHeroResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiHeroResult::null_arg("client");
        }
        if response.is_null() {
            return FfiHeroResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = ffi_response_to_core(unsafe { &*response });
        match client.inner.parse_lookup(resp) {
            Ok(hero) => FfiHeroResult::ok_hero_detail(to_detail_view_model(&hero)),
            Err(e) => FfiHeroResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiHeroResult::panic("panic in heroiq_parse_lookup"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by any `heroiq_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn heroiq_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiHttpRequest::free(req) });
}

/// Free a result returned by any `heroiq_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn heroiq_free_result(result: *mut FfiHeroResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiHeroResult::free(result) });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn heroiq_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| unsafe { free_c_string(s) });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    fn new_client() -> *mut FfiHeroClient {
        let url = CString::new("http://localhost:3000").unwrap();
        let token = CString::new("tok").unwrap();
        let client = heroiq_client_new(url.as_ptr(), token.as_ptr());
        assert!(!client.is_null());
        client
    }

    fn text(s: *const c_char) -> String {
        unsafe { CStr::from_ptr(s) }.to_str().unwrap().to_string()
    }

    fn rows(rows: &FfiInfoRows) -> Vec<(String, String)> {
        if rows.len == 0 {
            return Vec::new();
        }
        unsafe { std::slice::from_raw_parts(rows.items, rows.len as usize) }
            .iter()
            .map(|r| (text(r.label), text(r.value)))
            .collect()
    }

    fn response(status: u16, body: &CString) -> FfiHttpResponse {
        FfiHttpResponse {
            status,
            body: body.as_ptr(),
        }
    }

    #[test]
    fn client_new_and_free() {
        heroiq_client_free(new_client());
    }

    #[test]
    fn client_new_null_returns_null() {
        let url = CString::new("http://localhost:3000").unwrap();
        assert!(heroiq_client_new(ptr::null(), url.as_ptr()).is_null());
        assert!(heroiq_client_new(url.as_ptr(), ptr::null()).is_null());
    }

    #[test]
    fn client_free_null_is_safe() {
        heroiq_client_free(ptr::null_mut());
    }

    #[test]
    fn build_search_encodes_query() {
        let client = new_client();
        let query = CString::new("iron man").unwrap();
        let req = heroiq_build_search(client, query.as_ptr());
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Get));
        assert_eq!(text(req_ref.path), "http://localhost:3000/tok/search/iron%20man");
        assert!(req_ref.body.is_null());
        assert_eq!(req_ref.headers_len, 0);

        heroiq_free_request(req);
        heroiq_client_free(client);
    }

    #[test]
    fn build_lookup_appends_id() {
        let client = new_client();
        let id = CString::new("70").unwrap();
        let req = heroiq_build_lookup(client, id.as_ptr());
        assert!(!req.is_null());
        assert_eq!(text(unsafe { &*req }.path), "http://localhost:3000/tok/70");

        heroiq_free_request(req);
        heroiq_client_free(client);
    }

    #[test]
    fn build_with_null_arguments_returns_null() {
        let client = new_client();
        let id = CString::new("70").unwrap();
        assert!(heroiq_build_search(client, ptr::null()).is_null());
        assert!(heroiq_build_lookup(ptr::null(), id.as_ptr()).is_null());
        heroiq_client_free(client);
    }

    #[test]
    fn parse_search_two_hits() {
        let client = new_client();
        let body = CString::new(
            r#"{"response":"success","results-for":"batman","results":[
                {"id":"69","name":"Batman","image":{"url":"http://x/69.jpg"}},
                {"id":"70","name":"Batman","image":{"url":"http://x/70.jpg"}}
            ]}"#,
        )
        .unwrap();
        let result = heroiq_parse_search(client, &response(200, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert!(r.error_message.is_null());
        assert_eq!(r.data_tag, FfiDataTag::HeroList);

        let list = unsafe { &*(r.data as *const FfiHeroList) };
        assert_eq!(list.len, 2);
        let items = unsafe { std::slice::from_raw_parts(list.items, list.len as usize) };
        assert_eq!(text(items[0].id), "69");
        assert_eq!(text(items[1].image_url), "http://x/70.jpg");

        heroiq_free_result(result);
        heroiq_client_free(client);
    }

    #[test]
    fn parse_search_miss_is_decode_error() {
        let client = new_client();
        let body = CString::new(r#"{"response":"error","error":"character with given name not found"}"#).unwrap();
        let result = heroiq_parse_search(client, &response(200, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Decode);
        assert!(text(r.error_message).contains("character with given name not found"));
        assert!(r.data.is_null());

        heroiq_free_result(result);
        heroiq_client_free(client);
    }

    #[test]
    fn parse_lookup_flattens_detail() {
        let client = new_client();
        let body = CString::new(
            r#"{"response":"success","id":"70","name":"Batman","image":{"url":"http://x/70.jpg"},
                "powerstats":{"intelligence":"null","combat":"100","power":"47"},
                "biography":{"full-name":"Bruce Wayne","aliases":["Insider","Matches Malone"],
                             "publisher":"DC Comics","alignment":"good"},
                "work":{"occupation":"Businessman","base":"-"}}"#,
        )
        .unwrap();
        let result = heroiq_parse_lookup(client, &response(200, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(r.data_tag, FfiDataTag::HeroDetail);

        let hero = unsafe { &*(r.data as *const FfiHeroDetail) };
        assert_eq!(text(hero.name), "Batman");
        assert_eq!(text(hero.real_name), "Bruce Wayne");
        assert_eq!(text(hero.publisher), "DC Comics");
        assert_eq!(hero.alignment, FfiAlignment::Good);
        assert_eq!(text(hero.alignment_label), "good");

        assert_eq!(hero.stats_len, 2);
        let stats = unsafe { std::slice::from_raw_parts(hero.stats, hero.stats_len as usize) };
        assert_eq!(text(stats[0].label), "Combat");
        assert_eq!(stats[0].value, 100);
        assert_eq!(stats[1].value, 47);

        assert_eq!(
            rows(&hero.biography),
            [
                ("Full Name".to_string(), "Bruce Wayne".to_string()),
                ("Aliases".to_string(), "Insider, Matches Malone".to_string()),
            ]
        );
        assert_eq!(rows(&hero.work)[0], ("Occupation".to_string(), "Businessman".to_string()));
        assert!(rows(&hero.connections).is_empty());
        assert!(hero.connections.items.is_null());

        heroiq_free_result(result);
        heroiq_client_free(client);
    }

    #[test]
    fn parse_lookup_not_found_carries_status() {
        let client = new_client();
        let body = CString::new("{}").unwrap();
        let result = heroiq_parse_lookup(client, &response(404, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Http);
        assert_eq!(r.http_status, 404);
        assert!(!r.error_message.is_null());
        assert_eq!(r.data_tag, FfiDataTag::None);

        heroiq_free_result(result);
        heroiq_client_free(client);
    }

    #[test]
    fn parse_lookup_missing_id_is_decode_error() {
        let client = new_client();
        let body = CString::new(r#"{"name":"Nobody","image":{"url":"u"}}"#).unwrap();
        let result = heroiq_parse_lookup(client, &response(200, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Decode);
        assert_eq!(r.http_status, 0);

        heroiq_free_result(result);
        heroiq_client_free(client);
    }

    #[test]
    fn parse_null_body_is_empty_body() {
        let client = new_client();
        let resp = FfiHttpResponse {
            status: 200,
            body: ptr::null(),
        };
        let result = heroiq_parse_search(client, &resp);
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::Decode);

        heroiq_free_result(result);
        heroiq_client_free(client);
    }

    #[test]
    fn parse_null_client_returns_null_arg() {
        let body = CString::new("{}").unwrap();
        let result = heroiq_parse_search(ptr::null(), &response(200, &body));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);
        assert_eq!(text(r.error_message), "null argument: client");

        heroiq_free_result(result);
    }

    #[test]
    fn parse_null_response_returns_null_arg() {
        let client = new_client();
        let result = heroiq_parse_lookup(client, ptr::null());
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::NullArg);

        heroiq_free_result(result);
        heroiq_client_free(client);
    }

    #[test]
    fn free_request_null_is_safe() {
        heroiq_free_request(ptr::null_mut());
    }

    #[test]
    fn free_result_null_is_safe() {
        heroiq_free_result(ptr::null_mut());
    }

    #[test]
    fn free_string_null_is_safe() {
        heroiq_free_string(ptr::null_mut());
    }
}
