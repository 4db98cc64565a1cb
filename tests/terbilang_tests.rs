// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bukukas::error::TerbilangError;
use bukukas::terbilang::{terbilang, terbilang_rupiah};

#[test]
fn small_numbers() {
    assert_eq!(terbilang(0).unwrap(), "Nol");
    assert_eq!(terbilang(1).unwrap(), "Satu");
    assert_eq!(terbilang(10).unwrap(), "Sepuluh");
    assert_eq!(terbilang(11).unwrap(), "Sebelas");
    assert_eq!(terbilang(12).unwrap(), "Dua Belas");
    assert_eq!(terbilang(19).unwrap(), "Sembilan Belas");
    assert_eq!(terbilang(20).unwrap(), "Dua Puluh");
    assert_eq!(terbilang(45).unwrap(), "Empat Puluh Lima");
}

#[test]
fn hundreds_and_thousands_use_se_prefix() {
    assert_eq!(terbilang(100).unwrap(), "Seratus");
    assert_eq!(terbilang(111).unwrap(), "Seratus Sebelas");
    assert_eq!(terbilang(250).unwrap(), "Dua Ratus Lima Puluh");
    assert_eq!(terbilang(1000).unwrap(), "Seribu");
    assert_eq!(terbilang(1001).unwrap(), "Seribu Satu");
    assert_eq!(terbilang(2000).unwrap(), "Dua Ribu");
    assert_eq!(terbilang(25_000).unwrap(), "Dua Puluh Lima Ribu");
    assert_eq!(terbilang(100_000).unwrap(), "Seratus Ribu");
}

#[test]
fn millions_and_up() {
    assert_eq!(terbilang(1_000_000).unwrap(), "Satu Juta");
    assert_eq!(terbilang(1_500_000).unwrap(), "Satu Juta Lima Ratus Ribu");
    assert_eq!(
        terbilang(2_750_500).unwrap(),
        "Dua Juta Tujuh Ratus Lima Puluh Ribu Lima Ratus"
    );
    assert_eq!(terbilang(1_000_000_000).unwrap(), "Semilyar");
    assert_eq!(terbilang(3_000_000_001).unwrap(), "Tiga Milyar Satu");
    assert_eq!(terbilang(1_000_000_000_000).unwrap(), "Setrilyun");
    assert_eq!(
        terbilang(999_999_999_999_999).unwrap(),
        "Sembilan Ratus Sembilan Puluh Sembilan Trilyun \
         Sembilan Ratus Sembilan Puluh Sembilan Milyar \
         Sembilan Ratus Sembilan Puluh Sembilan Juta \
         Sembilan Ratus Sembilan Puluh Sembilan Ribu \
         Sembilan Ratus Sembilan Puluh Sembilan"
    );
}

#[test]
fn no_double_or_edge_spaces() {
    for n in [10, 100, 1000, 10_000, 100_000, 1_000_100, 20_000_020, 1_000_000_000] {
        let w = terbilang(n).unwrap();
        assert!(!w.contains("  "), "{} -> {:?}", n, w);
        assert_eq!(w, w.trim());
    }
}

#[test]
fn rejects_out_of_range() {
    assert!(matches!(terbilang(-1), Err(TerbilangError::Negative(-1))));
    assert!(matches!(
        terbilang(1_000_000_000_000_000),
        Err(TerbilangError::TooLarge(_))
    ));
    assert!(terbilang(i64::MAX).is_err());
}

#[test]
fn rupiah_suffix() {
    assert_eq!(terbilang_rupiah(150_000).unwrap(), "Seratus Lima Puluh Ribu Rupiah");
    assert_eq!(terbilang_rupiah(0).unwrap(), "Nol Rupiah");
}
