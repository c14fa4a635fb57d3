// Copyright 2020 Mateusz Janda.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use rbencode::{Error, RawFinder};

#[test]
fn find_raw_int_value() {
    assert_eq!(
        RawFinder::find_first(b"k", b"d1:ki-5ee"),
        Ok(Some(&b"i-5e"[..]))
    );
}

#[test]
fn find_raw_str_value() {
    assert_eq!(
        RawFinder::find_first(b"k", b"d1:k4:spame"),
        Ok(Some(&b"4:spam"[..]))
    );
}

#[test]
fn find_raw_list_value() {
    assert_eq!(
        RawFinder::find_first(b"k", b"d1:kli10ei20eee"),
        Ok(Some(&b"li10ei20ee"[..]))
    );
}

#[test]
fn find_raw_dict_value_unsorted_keys() {
    assert_eq!(
        RawFinder::find_first(b"info", b"d1:ai1e4:infod1:bi1e1:ai2eee"),
        Ok(Some(&b"d1:bi1e1:ai2ee"[..]))
    );
}

#[test]
fn find_first_of_duplicates() {
    assert_eq!(
        RawFinder::find_first(b"k", b"d1:ki1e1:ki2ee"),
        Ok(Some(&b"i1e"[..]))
    );
}

#[test]
fn find_last_of_duplicates() {
    assert_eq!(
        RawFinder::find_last(b"k", b"d1:ki1e1:ai0e1:kli2eee"),
        Ok(Some(&b"li2ee"[..]))
    );
}

#[test]
fn find_last_single_occurrence() {
    assert_eq!(
        RawFinder::find_last(b"info", b"d4:infod1:bi1ee1:ai2ee"),
        Ok(Some(&b"d1:bi1ee"[..]))
    );
    assert_eq!(RawFinder::find_last(b"x", b"d1:ki1ee"), Ok(None));
}

#[test]
fn find_last_malformed_after_match() {
    assert_eq!(
        RawFinder::find_last(b"k", b"d1:ki1e1:ai+1ee"),
        Err(Error::DecodeMalformedInteger(10))
    );
}

#[test]
fn key_not_found() {
    assert_eq!(RawFinder::find_first(b"x", b"d1:ki1ee"), Ok(None));
}

#[test]
fn nested_key_is_not_searched() {
    assert_eq!(RawFinder::find_first(b"k", b"d1:ad1:ki1eee"), Ok(None));
}

#[test]
fn top_level_not_dict() {
    assert_eq!(RawFinder::find_first(b"k", b"li1ee"), Ok(None));
}

#[test]
fn empty_input() {
    assert_eq!(
        RawFinder::find_first(b"k", b""),
        Err(Error::DecodeEmptyInput)
    );
}

#[test]
fn malformed_value_before_key() {
    assert_eq!(
        RawFinder::find_first(b"k", b"d1:ai+1e1:ki1ee"),
        Err(Error::DecodeMalformedInteger(4))
    );
}

#[test]
fn invalid_key_type() {
    assert_eq!(
        RawFinder::find_first(b"k", b"di1e1:ve"),
        Err(Error::DecodeInvalidKeyType(1))
    );
}
