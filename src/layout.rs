//! Corne keymap: 4 rows x 12 columns, left half in columns 0..6, right half
//! in columns 6..12.
#![allow(non_upper_case_globals)]

use usbd_human_interface_device::page::Keyboard::*;

use crate::action::{composite, k, lt, mo, mt, shifted, Action, NO, TRNS};
use crate::keymap::Layer;

pub const ROWS: usize = 4;
pub const COLS: usize = 12;
pub const LAYERS: usize = 4;

pub const DEFAULT: u8 = 0;
pub const RAISE: u8 = 1;
pub const LOWER: u8 = 2;
pub const ADJUST: u8 = 3;

const Exclamation: Action = shifted(Keyboard1);
const At: Action = shifted(Keyboard2);
const Octohorp: Action = shifted(Keyboard3);
const Dollar: Action = shifted(Keyboard4);
const Percent: Action = shifted(Keyboard5);
const Exponent: Action = shifted(Keyboard6);
const Ampersand: Action = shifted(Keyboard7);
const Mul: Action = shifted(Keyboard8);
const LeftPar: Action = shifted(Keyboard9);
const RightPar: Action = shifted(Keyboard0);
const Tilde: Action = shifted(Grave);
const Bar: Action = shifted(Backslash);
const Underscore: Action = shifted(Minus);
const Plus: Action = shifted(Equal);
const Less: Action = shifted(Comma);
const Greater: Action = shifted(Dot);
const LeftCurly: Action = shifted(LeftBrace);
const RightCurly: Action = shifted(RightBrace);
const Quote: Action = shifted(Apostrophe);

const SpaceCtrl: Action = composite(Space);
const AltTwo: Action = mt(LeftAlt, Keyboard2);

#[rustfmt::skip]
pub static LAYOUT: [Layer<ROWS, COLS>; LAYERS] = [
    // Default
    [
        [ k(Tab),         k(Q), k(W), k(E),     k(R),        k(T),            k(Y),                  k(U),               k(I),     k(O),   k(P),            k(Minus), ],
        [ k(LeftControl), k(A), k(S), k(D),     k(F),        k(G),            k(H),                  k(J),               k(K),     k(L),   k(Semicolon),    k(Apostrophe), ],
        [ k(LeftShift),   k(Z), k(X), k(C),     k(V),        k(B),            k(N),                  k(M),               k(Comma), k(Dot), k(ForwardSlash), k(RightShift), ],
        [ NO,             NO,   NO,   k(LANG1), k(LeftGUI),  lt(LOWER, Space), lt(RAISE, ReturnEnter), k(DeleteBackspace), k(LANG2), NO,     NO,              NO, ],
    ],
    // Raise: symbols and arrows
    [
        [ k(Grave),     Exclamation, At,         Octohorp,       Dollar,     Percent,      Exponent,               Ampersand,    Mul,        LeftPar,     RightPar,        k(Equal), ],
        [ Tilde,        Less,        LeftCurly,  k(LeftBrace),   LeftPar,    k(Apostrophe), k(LeftArrow),          k(DownArrow), k(UpArrow), k(RightArrow), Underscore,    Bar, ],
        [ k(LeftShift), Greater,     RightCurly, k(RightBrace),  RightPar,   Quote,        Tilde,                  k(Backslash), k(Comma),   k(Dot),      k(ForwardSlash), k(RightShift), ],
        [ TRNS,         TRNS,        TRNS,       AltTwo,         k(LeftGUI), mo(ADJUST),   lt(RAISE, ReturnEnter), SpaceCtrl,    TRNS,       TRNS,        TRNS,            TRNS, ],
    ],
    // Lower: numbers
    [
        [ k(Escape),    Exclamation,  At,           Octohorp,       Dollar,         Percent,          Exponent,     Ampersand,    Mul,          LeftPar,      RightPar,        Plus, ],
        [ k(Tab),       k(Keyboard1), k(Keyboard2), k(Keyboard3),   k(Keyboard4),   k(Keyboard5),     k(Keyboard6), k(Keyboard7), k(Keyboard8), k(Keyboard9), k(Keyboard0),    k(DeleteBackspace), ],
        [ k(LeftShift), Greater,      RightCurly,   k(RightBrace),  RightPar,       Quote,            k(Keyboard0), TRNS,         TRNS,         TRNS,         k(ForwardSlash), k(Comma), ],
        [ TRNS,         TRNS,         TRNS,         AltTwo,         k(LeftControl), lt(LOWER, Space), mo(ADJUST),   k(RightGUI),  TRNS,         TRNS,         TRNS,            TRNS, ],
    ],
    // Adjust: function keys
    [
        [ k(F1), k(F2), k(F3), k(F4), k(F5),          k(F6),      k(F7),      k(F8),     k(F9), k(F10), k(F11), k(F12), ],
        [ TRNS,  TRNS,  TRNS,  TRNS,  TRNS,           TRNS,       TRNS,       TRNS,      TRNS,  TRNS,   TRNS,   TRNS, ],
        [ TRNS,  TRNS,  TRNS,  TRNS,  TRNS,           TRNS,       TRNS,       TRNS,      TRNS,  TRNS,   TRNS,   TRNS, ],
        [ TRNS,  TRNS,  TRNS,  TRNS,  k(LeftControl), mo(ADJUST), mo(ADJUST), SpaceCtrl, TRNS,  TRNS,   TRNS,   TRNS, ],
    ],
];
