//! Internal system coprocessor register set
//!
//! Register indices and bit positions of the STORM Core system coprocessor, as defined by the core
//! header revision of 2012-03-08. These values are a compatibility contract with the hardware:
//! nothing in the demo reads or writes these registers.
//!
//! A later revision of the header reassigns indices 2 to 5 and 9 to 12 (extra ID registers and an
//! internal timer). That revision must be confirmed against the SoC register specification before
//! being added here.

// —————————————————————————— Coprocessor Registers ————————————————————————— //

/// Register indices within the system coprocessor.
pub mod sys_cp {
    /// System coprocessor number.
    pub const SYS_CP: u32 = 15;
    /// ID register 0
    pub const ID_REG_0: u32 = 0;
    /// ID register 1
    pub const ID_REG_1: u32 = 1;
    /// ID register 2
    pub const ID_REG_2: u32 = 2;
    /// System control register 0
    pub const SYS_CTRL_0: u32 = 6;
    /// Cache statistics register
    pub const CSTAT: u32 = 8;
    /// Address feedback from the bus unit, used for exception handling.
    pub const ADR_FB: u32 = 9;
    /// Internal LFSR, polynomial
    pub const LFSR_POLY: u32 = 11;
    /// Internal LFSR, shift register
    pub const LFSR_DATA: u32 = 12;
    /// System IO ports
    pub const SYS_IO: u32 = 13;
}

// ————————————————————————— System Control Register ———————————————————————— //

/// Bit positions within the system control register 0.
pub mod sys_ctrl_0 {
    /// Flush d-cache
    pub const DC_FLUSH: u32 = 0;
    /// Clear d-cache
    pub const DC_CLEAR: u32 = 1;
    /// Flush i-cache
    pub const IC_CLEAR: u32 = 2;
    /// Cache write-through enable
    pub const DC_WTHRU: u32 = 3;
    /// Auto pre-reload d-cache page
    pub const DC_AUTOPR: u32 = 4;
    /// Auto pre-reload i-cache page
    pub const IC_AUTOPR: u32 = 5;
    /// Enable LFSR
    pub const LFSR_EN: u32 = 13;
    /// LFSR update mode
    pub const LFSR_M: u32 = 14;
    /// LFSR shift direction
    pub const LFSR_D: u32 = 15;
    /// Max bus cycle length, bit 0
    pub const MBC_0: u32 = 16;
    pub const MBC_LSB: u32 = 16;
    /// Max bus cycle length, bit 15
    pub const MBC_15: u32 = 31;
    pub const MBC_MSB: u32 = 31;

    /// Returns the mask of a single bit.
    pub const fn bit(pos: u32) -> u32 {
        1 << pos
    }

    /// Mask of the 16-bit max bus cycle length field.
    pub const MBC_MASK: u32 = (u32::MAX >> (31 - (MBC_MSB - MBC_LSB))) << MBC_LSB;
}

// ————————————————————————————— Name Tables ———————————————————————————————— //

/// All system coprocessor register indices, by name.
#[rustfmt::skip]
pub const SYS_CP_REGISTERS: &[(&str, u32)] = &[
    ("SYS_CP",     sys_cp::SYS_CP),
    ("ID_REG_0",   sys_cp::ID_REG_0),
    ("ID_REG_1",   sys_cp::ID_REG_1),
    ("ID_REG_2",   sys_cp::ID_REG_2),
    ("SYS_CTRL_0", sys_cp::SYS_CTRL_0),
    ("CSTAT",      sys_cp::CSTAT),
    ("ADR_FB",     sys_cp::ADR_FB),
    ("LFSR_POLY",  sys_cp::LFSR_POLY),
    ("LFSR_DATA",  sys_cp::LFSR_DATA),
    ("SYS_IO",     sys_cp::SYS_IO),
];

/// All bit positions of the system control register 0, by name.
#[rustfmt::skip]
pub const SYS_CTRL_0_BITS: &[(&str, u32)] = &[
    ("DC_FLUSH",  sys_ctrl_0::DC_FLUSH),
    ("DC_CLEAR",  sys_ctrl_0::DC_CLEAR),
    ("IC_CLEAR",  sys_ctrl_0::IC_CLEAR),
    ("DC_WTHRU",  sys_ctrl_0::DC_WTHRU),
    ("DC_AUTOPR", sys_ctrl_0::DC_AUTOPR),
    ("IC_AUTOPR", sys_ctrl_0::IC_AUTOPR),
    ("LFSR_EN",   sys_ctrl_0::LFSR_EN),
    ("LFSR_M",    sys_ctrl_0::LFSR_M),
    ("LFSR_D",    sys_ctrl_0::LFSR_D),
    ("MBC_0",     sys_ctrl_0::MBC_0),
    ("MBC_LSB",   sys_ctrl_0::MBC_LSB),
    ("MBC_15",    sys_ctrl_0::MBC_15),
    ("MBC_MSB",   sys_ctrl_0::MBC_MSB),
];

/// Look up a register index or bit position by its symbolic name.
///
/// Names are case sensitive and match the hardware documentation.
pub fn lookup(name: &str) -> Option<u32> {
    SYS_CP_REGISTERS
        .iter()
        .chain(SYS_CTRL_0_BITS.iter())
        .find(|(entry, _)| *entry == name)
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_indices() {
        assert_eq!(lookup("SYS_CP"), Some(15));
        assert_eq!(lookup("ID_REG_2"), Some(2));
        assert_eq!(lookup("SYS_CTRL_0"), Some(6));
        assert_eq!(lookup("CSTAT"), Some(8));
        assert_eq!(lookup("ADR_FB"), Some(9));
        assert_eq!(lookup("LFSR_POLY"), Some(11));
        assert_eq!(lookup("LFSR_DATA"), Some(12));
        assert_eq!(lookup("SYS_IO"), Some(13));

        for (_, idx) in SYS_CP_REGISTERS {
            assert!(*idx <= 15);
        }
    }

    #[test]
    fn control_bits() {
        assert_eq!(lookup("DC_FLUSH"), Some(0));
        assert_eq!(lookup("IC_AUTOPR"), Some(5));
        assert_eq!(lookup("LFSR_EN"), Some(13));
        assert_eq!(lookup("LFSR_D"), Some(15));
        assert_eq!(lookup("MBC_LSB"), lookup("MBC_0"));
        assert_eq!(lookup("MBC_MSB"), lookup("MBC_15"));

        for (_, pos) in SYS_CTRL_0_BITS {
            assert!(*pos <= 31);
        }
    }

    #[test]
    fn unknown_names() {
        assert_eq!(lookup("TIME_COUNT"), None);
        assert_eq!(lookup("sys_cp"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn names_are_unique() {
        let all: Vec<_> = SYS_CP_REGISTERS.iter().chain(SYS_CTRL_0_BITS).collect();
        for (i, (a, _)) in all.iter().enumerate() {
            for (b, _) in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn bus_cycle_field() {
        assert_eq!(sys_ctrl_0::MBC_MASK, 0xFFFF_0000);
        assert_eq!(sys_ctrl_0::bit(sys_ctrl_0::LFSR_EN), 0x2000);
        assert_eq!(sys_ctrl_0::MBC_MASK & sys_ctrl_0::bit(sys_ctrl_0::LFSR_D), 0);
    }
}
