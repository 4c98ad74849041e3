/*
 *  Copyright (C) 2025  Markus Elias Gerber
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use static_assertions::const_assert_eq;

/// Virtual page number, i.e. a logical address without its page offset
pub type PageNumber = u64;

/// Number of offset bits inside a page
pub const PAGE_SHIFT: u32 = 12;

/// Size of a single page in bytes
pub const PAGE_SIZE: u64 = 4096;

const_assert_eq!(PAGE_SIZE, 1 << PAGE_SHIFT);

/// Maps a logical address to the page that contains it
#[inline]
pub const fn page_number(address: u64) -> PageNumber {
    address >> PAGE_SHIFT
}

#[inline]
pub const fn page_offset(address: u64) -> u64 {
    address & (PAGE_SIZE - 1)
}

#[cfg(test)]
mod test {
    use super::{page_number, page_offset, PAGE_SIZE};

    #[test]
    fn test_page_number() {
        assert_eq!(page_number(0x0000), 0);
        assert_eq!(page_number(0x0fff), 0);
        assert_eq!(page_number(0x1000), 1);
        assert_eq!(page_number(0x2abc), 2);
        assert_eq!(page_number(u64::MAX), u64::MAX >> 12);
    }

    #[test]
    fn test_address_split() {
        // every address has to be restorable from page number and offset
        for address in (0..PAGE_SIZE * 4).step_by(97) {
            let restored = (page_number(address) * PAGE_SIZE) + page_offset(address);
            assert_eq!(restored, address);
        }
    }
}
