//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, pointer plus length instead of `Vec`,
//! and enums with explicit discriminants. Arrays are handed out as boxed
//! slices so the free path can rebuild them from `(ptr, len)` exactly.
//! Conversion and release helpers live here to keep `lib.rs` focused on the
//! `extern "C"` surface.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;
use std::ptr;

use heroiq_core::error::ApiError;
use heroiq_core::http::HttpMethod;
use heroiq_core::types::Alignment;
use heroiq_core::view_model::{HeroDetailViewModel, HeroViewModel, InfoRow, StatEntry};

/// Opaque handle to a `HeroClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiHeroClient {
    pub(crate) inner: heroiq_core::HeroClient,
}

/// Allocate a C string. Interior NULs cannot be represented and are dropped.
pub(crate) fn c_string(s: impl Into<String>) -> *mut c_char {
    let mut s: String = s.into();
    s.retain(|c| c != '\0');
    CString::new(s).unwrap_or_default().into_raw()
}

/// Release a string from [`c_string`]. Null is ignored.
///
/// # Safety
/// `s` must be null or come from [`c_string`] and not be freed twice.
pub(crate) unsafe fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Hand a vector to C as `(ptr, len)`. An empty vector is `(null, 0)`.
fn into_raw_slice<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (ptr::null_mut(), 0);
    }
    let len = items.len() as u32;
    let ptr = Box::into_raw(items.into_boxed_slice()) as *mut T;
    (ptr, len)
}

/// Take back a slice from [`into_raw_slice`].
///
/// # Safety
/// `(ptr, len)` must come from [`into_raw_slice`] and not be freed twice.
unsafe fn from_raw_slice<T>(ptr: *mut T, len: u32) -> Box<[T]> {
    if ptr.is_null() || len == 0 {
        return Box::new([]);
    }
    unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(ptr, len as usize)) }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `heroiq_build_*` functions. The host executes the request and
/// passes the response back through `heroiq_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    /// Absolute, percent-encoded URL.
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: heroiq_core::HttpRequest) -> *mut Self {
        let headers: Vec<FfiHeader> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: c_string(k),
                value: c_string(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_slice(headers);

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: c_string(req.path),
            headers,
            headers_len,
            body: req.body.map(c_string).unwrap_or(ptr::null_mut()),
        }))
    }

    /// # Safety
    /// `req` must come from [`FfiHttpRequest::from_core`].
    pub(crate) unsafe fn free(req: *mut Self) {
        let req = unsafe { Box::from_raw(req) };
        unsafe {
            free_c_string(req.path);
            free_c_string(req.body);
            for h in from_raw_slice(req.headers, req.headers_len).iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The host constructs this after executing a request, then passes a pointer
/// to a `heroiq_parse_*` function. The FFI layer reads but does not free
/// these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    /// UTF-8 body, NUL-terminated. Null is read as an empty body.
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiHeroResult`.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Http = 1,
    Decode = 2,
    Transport = 3,
    Config = 4,
    Panic = 5,
    NullArg = 6,
}

/// Tag that tells `heroiq_free_result` what `FfiHeroResult::data` points to.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    HeroList = 1,
    HeroDetail = 2,
}

/// One list row.
#[repr(C)]
pub struct FfiHero {
    pub id: *mut c_char,
    pub name: *mut c_char,
    pub image_url: *mut c_char,
}

impl FfiHero {
    fn from_view_model(hero: HeroViewModel) -> Self {
        FfiHero {
            id: c_string(hero.id),
            name: c_string(hero.name),
            image_url: c_string(hero.image_url),
        }
    }

    unsafe fn free_fields(&self) {
        unsafe {
            free_c_string(self.id);
            free_c_string(self.name);
            free_c_string(self.image_url);
        }
    }
}

#[repr(C)]
pub struct FfiHeroList {
    pub items: *mut FfiHero,
    pub len: u32,
}

#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiAlignment {
    Good = 0,
    Bad = 1,
    Neutral = 2,
    Other = 3,
}

impl From<&Alignment> for FfiAlignment {
    fn from(a: &Alignment) -> Self {
        match a {
            Alignment::Good => FfiAlignment::Good,
            Alignment::Bad => FfiAlignment::Bad,
            Alignment::Neutral => FfiAlignment::Neutral,
            Alignment::Other(_) => FfiAlignment::Other,
        }
    }
}

/// One stat bar.
#[repr(C)]
pub struct FfiStat {
    pub label: *mut c_char,
    pub value: u32,
}

#[repr(C)]
pub struct FfiInfoRow {
    pub label: *mut c_char,
    pub value: *mut c_char,
}

/// A titled info section of the detail screen.
#[repr(C)]
pub struct FfiInfoRows {
    pub items: *mut FfiInfoRow,
    pub len: u32,
}

impl FfiInfoRows {
    fn from_rows(rows: Vec<InfoRow>) -> Self {
        let rows = rows
            .into_iter()
            .map(|r| FfiInfoRow {
                label: c_string(r.label),
                value: c_string(r.value),
            })
            .collect();
        let (items, len) = into_raw_slice(rows);
        FfiInfoRows { items, len }
    }

    unsafe fn free_fields(&self) {
        for row in unsafe { from_raw_slice(self.items, self.len) }.iter() {
            unsafe {
                free_c_string(row.label);
                free_c_string(row.value);
            }
        }
    }
}

/// Everything the detail screen renders.
#[repr(C)]
pub struct FfiHeroDetail {
    pub id: *mut c_char,
    pub name: *mut c_char,
    pub image_url: *mut c_char,
    pub real_name: *mut c_char,
    pub publisher: *mut c_char,
    pub alignment: FfiAlignment,
    /// Alignment text as sent by the provider.
    pub alignment_label: *mut c_char,
    pub stats: *mut FfiStat,
    pub stats_len: u32,
    pub biography: FfiInfoRows,
    pub appearance: FfiInfoRows,
    pub work: FfiInfoRows,
    pub connections: FfiInfoRows,
}

impl FfiHeroDetail {
    fn from_view_model(hero: HeroDetailViewModel) -> Self {
        let stats = hero
            .stats
            .into_iter()
            .map(|StatEntry { label, value }| FfiStat {
                label: c_string(label),
                value,
            })
            .collect();
        let (stats, stats_len) = into_raw_slice(stats);

        FfiHeroDetail {
            id: c_string(hero.id),
            name: c_string(hero.name),
            image_url: c_string(hero.image_url),
            real_name: c_string(hero.real_name),
            publisher: c_string(hero.publisher),
            alignment: FfiAlignment::from(&hero.alignment),
            alignment_label: c_string(hero.alignment.as_str()),
            stats,
            stats_len,
            biography: FfiInfoRows::from_rows(hero.biography),
            appearance: FfiInfoRows::from_rows(hero.appearance),
            work: FfiInfoRows::from_rows(hero.work),
            connections: FfiInfoRows::from_rows(hero.connections),
        }
    }

    unsafe fn free_fields(&self) {
        unsafe {
            for s in [
                self.id,
                self.name,
                self.image_url,
                self.real_name,
                self.publisher,
                self.alignment_label,
            ] {
                free_c_string(s);
            }
            for stat in from_raw_slice(self.stats, self.stats_len).iter() {
                free_c_string(stat.label);
            }
            self.biography.free_fields();
            self.appearance.free_fields();
            self.work.free_fields();
            self.connections.free_fields();
        }
    }
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null. `http_status` is set for
/// `Http` errors only.
#[repr(C)]
pub struct FfiHeroResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiHeroResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: *mut c_char,
        http_status: u16,
        data_tag: FfiDataTag,
        data: *mut c_void,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiHeroResult {
            error_code,
            error_message,
            http_status,
            data_tag,
            data,
        }))
    }

    /// Build a success result carrying a list of heroes.
    pub(crate) fn ok_hero_list(heroes: Vec<HeroViewModel>) -> *mut Self {
        let heroes = heroes.into_iter().map(FfiHero::from_view_model).collect();
        let (items, len) = into_raw_slice(heroes);
        let list = Box::into_raw(Box::new(FfiHeroList { items, len }));
        Self::boxed(
            FfiErrorCode::Ok,
            ptr::null_mut(),
            0,
            FfiDataTag::HeroList,
            list as *mut c_void,
        )
    }

    /// Build a success result carrying one detail record.
    pub(crate) fn ok_hero_detail(hero: HeroDetailViewModel) -> *mut Self {
        let detail = Box::into_raw(Box::new(FfiHeroDetail::from_view_model(hero)));
        Self::boxed(
            FfiErrorCode::Ok,
            ptr::null_mut(),
            0,
            FfiDataTag::HeroDetail,
            detail as *mut c_void,
        )
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (code, status) = match &err {
            ApiError::Http { status, .. } => (FfiErrorCode::Http, *status),
            ApiError::Decode(_) => (FfiErrorCode::Decode, 0),
            ApiError::Transport(_) => (FfiErrorCode::Transport, 0),
            ApiError::Config(_) => (FfiErrorCode::Config, 0),
        };
        Self::boxed(code, c_string(err.to_string()), status, FfiDataTag::None, ptr::null_mut())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        let msg = format!("null argument: {name}");
        Self::boxed(FfiErrorCode::NullArg, c_string(msg), 0, FfiDataTag::None, ptr::null_mut())
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(FfiErrorCode::Panic, c_string(msg), 0, FfiDataTag::None, ptr::null_mut())
    }

    /// # Safety
    /// `result` must come from one of the constructors above.
    pub(crate) unsafe fn free(result: *mut Self) {
        let result = unsafe { Box::from_raw(result) };
        unsafe { free_c_string(result.error_message) };
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::HeroList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiHeroList) };
                for hero in unsafe { from_raw_slice(list.items, list.len) }.iter() {
                    unsafe { hero.free_fields() };
                }
            }
            FfiDataTag::HeroDetail => {
                let detail = unsafe { Box::from_raw(result.data as *mut FfiHeroDetail) };
                unsafe { detail.free_fields() };
            }
            FfiDataTag::None => {}
        }
    }
}
