use fv1_rs::decoder::{decode, Instruction};
use fv1_rs::resolve::{Options, Resolver};

fn enc_skp(flags: u32, offset: u32) -> u32 {
    (flags << 27) | (offset << 21) | 0x11
}

fn enc_regmult(opcode: u32, reg: u32, k: u32) -> u32 {
    (k << 16) | (reg << 5) | opcode
}

fn enc_bitop(opcode: u32, mask: u32) -> u32 {
    (mask << 8) | opcode
}

fn enc_cho(typeval: u32, sel: u32, flags: u32, d: u32) -> u32 {
    (typeval << 30) | (flags << 24) | (sel << 21) | (d << 5) | 0x14
}

/// Resolve a single word at the given address with the given options.
fn resolve_at(address: usize, word: u32, opts: Options) -> Instruction {
    let (program, _) = Resolver::new(opts).resolve_program(vec![decode(address, word)]);
    program.into_iter().next().unwrap()
}

fn resolve_one(word: u32) -> Instruction {
    resolve_at(0, word, Options::default())
}

#[test]
fn skp_zero_zero_is_nop() {
    let inst = resolve_one(0x0000_0011);
    assert_eq!(inst.mnemonic, "nop");
    assert_eq!(inst.operands, None);
    assert_eq!(inst.comment.as_deref(), Some("skp 0,0"));
}

#[test]
fn skp_absolute_registers_forward_label() {
    // GEZ, offset 3, at address 5: target is 5 + 3 + 1 = 9
    let word = enc_skp(0x02, 3);
    let (program, labels) =
        Resolver::new(Options::default()).resolve_program(vec![decode(5, word)]);
    let inst = &program[0];
    assert_eq!(inst.mnemonic, "skp");
    assert_eq!(inst.operands.as_deref(), Some("GEZ,addr09"));
    assert_eq!(inst.comment.as_deref(), Some("flags:0x02 offset:0x03"));
    assert_eq!(inst.target.as_deref(), Some("addr09"));
    assert_eq!(labels.get(&9).map(String::as_str), Some("addr09"));
}

#[test]
fn skp_relative_mode_renders_numeric_offset() {
    let opts = Options { relative_skip: true, ..Options::default() };
    let word = enc_skp(0x02, 3);
    let (program, labels) = Resolver::new(opts).resolve_program(vec![decode(5, word)]);
    assert_eq!(program[0].operands.as_deref(), Some("GEZ,3"));
    assert_eq!(program[0].target, None);
    assert!(labels.is_empty());
}

#[test]
fn skp_flag_names_join_low_to_high() {
    let inst = resolve_at(0, enc_skp(0x1f, 1), Options::default());
    assert_eq!(inst.operands.as_deref(), Some("NEG|GEZ|ZRO|ZRC|RUN,addr02"));
    // zero flags with a nonzero offset render the literal 0
    let inst = resolve_at(0, enc_skp(0, 2), Options::default());
    assert_eq!(inst.operands.as_deref(), Some("0,addr03"));
}

#[test]
fn skp_target_label_lands_on_destination() {
    let words = vec![decode(0, enc_skp(0x10, 1)), decode(1, 0), decode(2, 0)];
    let (program, _) = Resolver::new(Options::default()).resolve_program(words);
    assert_eq!(program[1].address, 1);
    assert_eq!(program[1].label, None);
    assert_eq!(program[2].label.as_deref(), Some("addr02"));
}

#[test]
fn rdfx_zero_multiplier_aliases_to_ldax() {
    let inst = resolve_one(enc_regmult(0x05, 0x20, 0));
    assert_eq!(inst.mnemonic, "ldax");
    assert_eq!(inst.operands.as_deref(), Some("REG0"));
    assert_eq!(inst.comment.as_deref(), Some("reg:0x20"));
}

#[test]
fn rdfx_nonzero_multiplier_stays_rdfx() {
    let inst = resolve_one(enc_regmult(0x05, 0x20, 0x4000));
    assert_eq!(inst.mnemonic, "rdfx");
    assert_eq!(inst.operands.as_deref(), Some("REG0,1.0"));
    assert_eq!(inst.comment.as_deref(), Some("reg:0x20 k:0x4000"));
}

#[test]
fn maxx_zero_zero_aliases_to_absa() {
    let inst = resolve_one(enc_regmult(0x09, 0, 0));
    assert_eq!(inst.mnemonic, "absa");
    assert_eq!(inst.operands, None);
    assert_eq!(inst.comment.as_deref(), Some("maxx 0,0"));
}

#[test]
fn maxx_with_register_is_not_absa() {
    let inst = resolve_one(enc_regmult(0x09, 0x02, 0));
    assert_eq!(inst.mnemonic, "maxx");
    assert_eq!(inst.operands.as_deref(), Some("SIN1_RATE,0.0"));
}

#[test]
fn regmult_unmapped_register_renders_hex() {
    let inst = resolve_one(enc_regmult(0x04, 0x0a, 0xc000));
    assert_eq!(inst.mnemonic, "rdax");
    assert_eq!(inst.operands.as_deref(), Some("0x0a,-1.0"));
}

#[test]
fn mulx_takes_single_register() {
    let inst = resolve_one((0x18 << 5) | 0x0a);
    assert_eq!(inst.mnemonic, "mulx");
    assert_eq!(inst.operands.as_deref(), Some("ADDR_PTR"));
    assert_eq!(inst.comment.as_deref(), Some("reg:0x18"));
}

#[test]
fn delay_family_renders_offset_and_s1_9() {
    let inst = resolve_one((0x400u32 << 21) | (0x7fff << 5) | 0x02);
    assert_eq!(inst.mnemonic, "wra");
    assert_eq!(inst.operands.as_deref(), Some("32767,-2.0"));
    assert_eq!(inst.comment.as_deref(), Some("del:0x7fff k:0x400"));
}

#[test]
fn scale_offset_family_renders_two_constants() {
    let inst = resolve_one((0x2000u32 << 16) | (0x200 << 5) | 0x0d);
    assert_eq!(inst.mnemonic, "sof");
    assert_eq!(inst.operands.as_deref(), Some("0.5,0.5"));
    assert_eq!(inst.comment.as_deref(), Some("k:0x2000 const:0x200"));
}

#[test]
fn rmpa_renders_single_multiplier() {
    let inst = resolve_one((0x100u32 << 21) | 0x01);
    assert_eq!(inst.mnemonic, "rmpa");
    assert_eq!(inst.operands.as_deref(), Some("0.5"));
    assert_eq!(inst.comment.as_deref(), Some("k:0x100"));
}

#[test]
fn jam_selector_is_forced_into_ramp_half() {
    let inst = resolve_one((0u32 << 6) | 0x13);
    assert_eq!(inst.operands.as_deref(), Some("RMP0"));
    assert_eq!(inst.comment.as_deref(), Some("lfo:0x2"));
    let inst = resolve_one((1u32 << 6) | 0x13);
    assert_eq!(inst.operands.as_deref(), Some("RMP1"));
}

#[test]
fn and_zero_aliases_to_clr() {
    let inst = resolve_one(enc_bitop(0x0e, 0));
    assert_eq!(inst.mnemonic, "clr");
    assert_eq!(inst.operands, None);
    assert_eq!(inst.comment.as_deref(), Some("and 0"));
}

#[test]
fn xor_full_mask_aliases_to_not() {
    let inst = resolve_one(enc_bitop(0x10, 0xffffff));
    assert_eq!(inst.mnemonic, "not");
    assert_eq!(inst.operands, None);
    assert_eq!(inst.comment.as_deref(), Some("xor 0xffffff"));
}

#[test]
fn bitop_comment_carries_only_the_fraction() {
    let inst = resolve_one(enc_bitop(0x0f, 0x800000));
    assert_eq!(inst.mnemonic, "or");
    assert_eq!(inst.operands.as_deref(), Some("0x800000"));
    assert_eq!(inst.comment.as_deref(), Some("val:-1.0"));

    let inst = resolve_one(enc_bitop(0x0e, 0x400000));
    assert_eq!(inst.operands.as_deref(), Some("0x400000"));
    assert_eq!(inst.comment.as_deref(), Some("val:0.5"));
}

#[test]
fn cho_rda_form() {
    let inst = resolve_one(enc_cho(0, 0, 0, 0x40));
    assert_eq!(inst.mnemonic, "cho");
    assert_eq!(inst.operands.as_deref(), Some("rda,SIN0,SIN,64"));
    assert_eq!(inst.comment.as_deref(), Some("t:0x0 n:0x0 c:0x00 addr:0x0040"));
}

#[test]
fn cho_invalid_type_decodes_as_rda_form() {
    let inst = resolve_one(enc_cho(1, 1, 0x01, 5));
    assert_eq!(inst.operands.as_deref(), Some("rda,SIN1,COS,5"));
    assert_eq!(inst.comment.as_deref(), Some("t:0x1 n:0x1 c:0x01 addr:0x0005"));
}

#[test]
fn cho_sof_form_renders_s15_constant() {
    let inst = resolve_one(enc_cho(2, 2, 0x06, 0x4000));
    assert_eq!(inst.operands.as_deref(), Some("sof,RMP0,REG|COMPC,0.5"));
    assert_eq!(inst.comment.as_deref(), Some("t:0x2 n:0x2 c:0x06 d:0x4000"));
}

#[test]
fn cho_rdal_form_has_no_data_operand() {
    let inst = resolve_one(enc_cho(3, 3, 0x30, 0xffff));
    assert_eq!(inst.operands.as_deref(), Some("rdal,RMP1,RPTR2|NA"));
    assert_eq!(inst.comment.as_deref(), Some("t:0x3 n:0x3 c:0x30"));
}

#[test]
fn wldx_bit30_set_takes_ramp_path() {
    // wldr RMP1, freq 0x8000, amp code 2
    let word = (1u32 << 30) | (1 << 29) | (0x8000 << 13) | (2 << 5) | 0x12;
    let inst = resolve_one(word);
    assert_eq!(inst.mnemonic, "wldr");
    assert_eq!(inst.operands.as_deref(), Some("RMP1,-32768.0,1024"));
    assert_eq!(inst.comment.as_deref(), Some("lfo:0x1 f:0x8000 a:0x2"));
    assert_eq!(inst.args, vec![3, 0x8000, 2]);
}

#[test]
fn wldx_bit30_clear_takes_sine_path() {
    // wlds SIN0, freq 256, amp 16384
    let word = (0x100u32 << 20) | (0x4000 << 5) | 0x12;
    let inst = resolve_one(word);
    assert_eq!(inst.mnemonic, "wlds");
    assert_eq!(inst.operands.as_deref(), Some("SIN0,256,16384"));
    assert_eq!(inst.comment.as_deref(), Some("lfo:0x0 f:0x100 a:0x4000"));
}

#[test]
fn wldr_amp_table_covers_all_codes() {
    for (code, name) in [(0u32, "4096"), (1, "2048"), (2, "1024"), (3, "512")] {
        let word = (1u32 << 30) | (code << 5) | 0x12;
        let inst = resolve_one(word);
        let operands = inst.operands.unwrap();
        assert!(operands.ends_with(name), "amp {code} -> {operands}");
    }
}

#[test]
fn raw_word_renders_hex_and_byte_dump() {
    let inst = resolve_one(0xdeadbe5f);
    assert_eq!(inst.mnemonic, "raw");
    assert_eq!(inst.operands.as_deref(), Some("0xdeadbe5f"));
    assert_eq!(inst.comment.as_deref(), Some("bytes: de ad be 5f"));
}

#[test]
fn raw_suppression_rewrites_to_nop() {
    let opts = Options { suppress_raw: true, ..Options::default() };
    let inst = resolve_at(0, 0xdeadbe5f, opts);
    assert_eq!(inst.mnemonic, "nop");
    assert_eq!(inst.operands, None);
    assert_eq!(inst.comment.as_deref(), Some("bytes: de ad be 5f"));
}
