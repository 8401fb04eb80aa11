/// Number of double-rounds per block (ChaCha20).
pub(crate) const DOUBLE_ROUNDS: usize = 10;

const R1: u32 = 16;
const R2: u32 = 12;
const R3: u32 = 8;
const R4: u32 = 7;

/// Column quadruples, one per state column.
pub(crate) const COLUMNS: [[usize; 4]; 4] = [
    [0, 4, 8, 12],
    [1, 5, 9, 13],
    [2, 6, 10, 14],
    [3, 7, 11, 15],
];

/// Diagonal quadruples: rows 1, 2, 3 rotated left by 1, 2, 3 slots.
pub(crate) const DIAGONALS: [[usize; 4]; 4] = [
    [0, 5, 10, 15],
    [1, 6, 11, 12],
    [2, 7, 8, 13],
    [3, 4, 9, 14],
];

/// The ChaCha quarter-round (add, xor, rotate on 32-bit words).
#[inline(always)]
pub(crate) fn quarter_round([mut a, mut b, mut c, mut d]: [u32; 4]) -> [u32; 4] {
    a = a.wrapping_add(b);
    d ^= a;
    d = d.rotate_left(R1);

    c = c.wrapping_add(d);
    b ^= c;
    b = b.rotate_left(R2);

    a = a.wrapping_add(b);
    d ^= a;
    d = d.rotate_left(R3);

    c = c.wrapping_add(d);
    b ^= c;
    b = b.rotate_left(R4);

    [a, b, c, d]
}

/// One column round followed by one diagonal round; `qr` is called with
/// the word indices of each quadruple in order.
#[inline(always)]
pub(crate) fn double_round_with(mut qr: impl FnMut([usize; 4])) {
    for quad in COLUMNS.into_iter().chain(DIAGONALS) {
        qr(quad);
    }
}

/// Double round over a single plain state.
#[cfg(test)]
pub(crate) fn double_round(x: &mut [u32; 16]) {
    double_round_with(|[a, b, c, d]| {
        [x[a], x[b], x[c], x[d]] = quarter_round([x[a], x[b], x[c], x[d]]);
    });
}
