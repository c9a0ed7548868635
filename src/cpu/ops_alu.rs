use super::{Cpu, constants::*};

// --- ALU Implementations ---
// Flag semantics: Z from the result, N set only by the subtract family,
// H/C at the nibble/byte boundary. INC/DEC leave C untouched.
impl Cpu {
    pub fn inc_u8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(FLAG_Z, result == 0);
        self.set_flag(FLAG_N, false);
        self.set_flag(FLAG_H, (value & 0x0F) == 0x0F);
        result
    }

    pub fn dec_u8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(FLAG_Z, result == 0);
        self.set_flag(FLAG_N, true);
        self.set_flag(FLAG_H, (value & 0x0F) == 0x00);
        result
    }

    pub fn add_a(&mut self, value: u8, use_carry: bool) {
        let carry_in = if use_carry && self.get_flag(FLAG_C) { 1 } else { 0 };
        let (res1, c1) = self.a.overflowing_add(value);
        let (result, c2) = res1.overflowing_add(carry_in);
        let half_carry = (self.a & 0x0F) + (value & 0x0F) + carry_in > 0x0F;
        self.a = result;
        self.set_flag(FLAG_Z, result == 0);
        self.set_flag(FLAG_N, false);
        self.set_flag(FLAG_H, half_carry);
        self.set_flag(FLAG_C, c1 || c2);
    }

    pub fn sub_a(&mut self, value: u8, use_carry: bool) {
        let carry_in = if use_carry && self.get_flag(FLAG_C) { 1 } else { 0 };
        let (res1, b1) = self.a.overflowing_sub(value);
        let (result, b2) = res1.overflowing_sub(carry_in);
        let half_borrow = (self.a & 0x0F) < (value & 0x0F) + carry_in;
        self.a = result;
        self.set_flag(FLAG_Z, result == 0);
        self.set_flag(FLAG_N, true);
        self.set_flag(FLAG_H, half_borrow);
        self.set_flag(FLAG_C, b1 || b2);
    }

    pub fn and_a(&mut self, value: u8) {
        self.a &= value;
        self.set_flag(FLAG_Z, self.a == 0);
        self.set_flag(FLAG_N | FLAG_C, false);
        self.set_flag(FLAG_H, true);
    }

    pub fn xor_a(&mut self, value: u8) {
        self.a ^= value;
        self.set_flag(FLAG_Z, self.a == 0);
        self.set_flag(FLAG_N | FLAG_H | FLAG_C, false);
    }

    pub fn or_a(&mut self, value: u8) {
        self.a |= value;
        self.set_flag(FLAG_Z, self.a == 0);
        self.set_flag(FLAG_N | FLAG_H | FLAG_C, false);
    }

    /// CP is SUB without the writeback.
    pub fn cp_a(&mut self, value: u8) {
        let saved_a = self.a;
        self.sub_a(value, false);
        self.a = saved_a;
    }

    /// ADD HL, rr. H from the bit-11 carry, C from the bit-15 carry of the
    /// 32-bit sum. Z is untouched.
    pub fn add_hl(&mut self, value: u16) {
        let hl = self.get_hl();
        let result = hl as u32 + value as u32;
        self.set_flag(FLAG_N, false);
        self.set_flag(FLAG_H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.set_flag(FLAG_C, result > 0xFFFF);
        self.set_hl(result as u16);
    }

    /// Shared core of ADD SP, r8 and LD HL, SP+r8: returns SP plus the
    /// signed offset, with H/C computed from the low-byte additions
    /// (the offset treated as an unsigned byte for flag purposes).
    pub fn add_sp_offset(&mut self, offset: i8) -> u16 {
        let sp = self.sp;
        let unsigned = offset as u8 as u16;
        self.set_flag(FLAG_Z | FLAG_N, false);
        self.set_flag(FLAG_H, (sp & 0x0F) + (unsigned & 0x0F) > 0x0F);
        self.set_flag(FLAG_C, (sp & 0xFF) + (unsigned & 0xFF) > 0xFF);
        sp.wrapping_add(offset as i16 as u16)
    }

    /// Corrects A into binary-coded decimal after an addition or subtraction.
    /// The pre-correction A is tested (0x99 / 0x09 thresholds); corrections
    /// combine, and C is set whenever the 0x60 correction applies.
    pub fn daa(&mut self) {
        let a = self.a;
        let n_flag = self.get_flag(FLAG_N);
        let h_flag = self.get_flag(FLAG_H);
        let mut c_flag = self.get_flag(FLAG_C);
        let mut correction = 0u8;

        if !n_flag {
            // After an addition
            if c_flag || a > 0x99 {
                correction |= 0x60;
                c_flag = true;
            }
            if h_flag || (a & 0x0F) > 0x09 {
                correction |= 0x06;
            }
            self.a = a.wrapping_add(correction);
        } else {
            // After a subtraction; C is preserved
            if c_flag {
                correction |= 0x60;
            }
            if h_flag {
                correction |= 0x06;
            }
            self.a = a.wrapping_sub(correction);
        }

        self.set_flag(FLAG_Z, self.a == 0);
        self.set_flag(FLAG_H, false);
        self.set_flag(FLAG_C, c_flag);
    }
}
