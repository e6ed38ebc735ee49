/// Precomputed diagonal-forward masks
/// FORWARD_DIAGONALS[color][square] holds the squares a piece of `color`
/// on `square` can step to diagonally (capture targets)
pub(crate) static FORWARD_DIAGONALS: [[u64; 64]; 2] = generate_forward_diagonals();

const fn generate_forward_diagonals() -> [[u64; 64]; 2] {
    let mut diagonals = [[0u64; 64]; 2];
    let mut sq = 0;

    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;

        // White moves towards rank 8, black towards rank 1
        let directions: [i8; 2] = [1, -1];

        let mut color = 0;
        while color < 2 {
            let new_rank = rank + directions[color];
            if new_rank >= 0 && new_rank < 8 {
                let mut mask = 0u64;
                if file > 0 {
                    mask |= 1u64 << ((new_rank * 8 + file - 1) as u32);
                }
                if file < 7 {
                    mask |= 1u64 << ((new_rank * 8 + file + 1) as u32);
                }
                diagonals[color][sq] = mask;
            }
            color += 1;
        }

        sq += 1;
    }

    diagonals
}
