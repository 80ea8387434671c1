use rand::RngCore;
use stegbits::{
    BitWidth, Decoded, Message, PixelBuffer, StegoError, Termination, decode, decode_with, encode,
    scan,
};

/// 创建一个单行、所有通道取相同值的像素缓冲区
fn uniform_buffer(pixels: u32, value: u8) -> PixelBuffer {
    PixelBuffer::from_raw(pixels, 1, vec![value; pixels as usize * 3])
        .expect("Failed to create uniform buffer.")
}

/// 创建一个带有随机像素的像素缓冲区
fn random_buffer(width: u32, height: u32) -> PixelBuffer {
    let mut data = vec![0u8; (width * height * 3) as usize];
    rand::rng().fill_bytes(&mut data);
    PixelBuffer::from_raw(width, height, data).expect("Failed to create random buffer.")
}

fn n(bits: u8) -> BitWidth {
    BitWidth::try_from(bits).expect("valid bit width")
}

fn text(message: &str) -> Message {
    Message::from_text(message).expect("single-byte text")
}

/// 验证 "hi" 在 n=3 下只改写前 19 个通道，最后一个通道只写入 2 位
#[test]
fn test_encode_hi_with_three_bits() -> anyhow::Result<()> {
    let pixels = uniform_buffer(70, 0xFF);
    assert!(pixels.capacity_bits(n(3)) >= 200);

    let encoded = encode(&pixels, &text("hi"), n(3))?;
    let channels = encoded.channels();

    // 'h' = 011 01000 ...
    assert_eq!(channels[0], 0b1111_1011);
    assert_eq!(channels[1], 0b1111_1010);
    // 第 56 位流只剩 2 位：写入窗口高端，最低位保持原值
    assert_eq!(channels[18], 0b1111_1001);
    assert!(channels[19..].iter().all(|&c| c == 0xFF));

    assert_eq!(decode(&encoded, n(3))?, Decoded::Found(text("hi")));
    Ok(())
}

/// 验证所有位宽下的往返一致性
#[test]
fn test_round_trip_every_bit_width() -> anyhow::Result<()> {
    let pixels = random_buffer(40, 40);
    let message = text("Round trip: Grüße aus Köln! ~ 0123456789 ÿ");

    for bits in 1..=7 {
        let encoded = encode(&pixels, &message, n(bits))?;
        assert_eq!(encoded.width(), pixels.width());
        assert_eq!(encoded.height(), pixels.height());

        for termination in [Termination::AfterAppend, Termination::BeforeAppend] {
            assert_eq!(
                decode_with(&encoded, n(bits), termination)?,
                Decoded::Found(message.clone()),
                "n = {bits}, {termination:?}"
            );
        }
    }
    Ok(())
}

/// 空消息也能被隐藏和恢复
#[test]
fn test_round_trip_empty_message() -> anyhow::Result<()> {
    let pixels = random_buffer(8, 8);
    let encoded = encode(&pixels, &Message::default(), n(1))?;
    let recovered = decode(&encoded, n(1))?.found();
    assert_eq!(recovered, Some(Message::default()));
    Ok(())
}

/// 所需比特数恰好等于容量时成功
#[test]
fn test_capacity_exact_fit() -> anyhow::Result<()> {
    // 8 像素 × 3 通道 × 2 位 = 48 位 = ("A" + 结束标记) × 8
    let pixels = PixelBuffer::from_raw(4, 2, vec![0x5A; 24])?;
    assert_eq!(pixels.capacity_bits(n(2)), 48);
    assert_eq!(pixels.max_message_len(n(2)), 1);

    let encoded = encode(&pixels, &text("A"), n(2))?;
    assert_eq!(decode(&encoded, n(2))?, Decoded::Found(text("A")));
    assert_eq!(
        decode_with(&encoded, n(2), Termination::BeforeAppend)?,
        Decoded::Found(text("A"))
    );
    Ok(())
}

/// 所需比特数比容量多 1 位时失败，且不产生输出
#[test]
fn test_capacity_exceeded_by_one_bit() {
    // 21 像素 × 3 通道 × 1 位 = 63 位，"abc" + 结束标记需要 64 位
    let pixels = uniform_buffer(21, 0x80);
    let result = encode(&pixels, &text("abc"), n(1));
    assert_eq!(
        result,
        Err(StegoError::CapacityExceeded {
            required: 64,
            capacity: 63
        })
    );

    // 13 像素只有 39 位，连结束标记都放不下
    let pixels = uniform_buffer(13, 0x80);
    assert!(matches!(
        encode(&pixels, &Message::default(), n(1)),
        Err(StegoError::CapacityExceeded {
            required: 40,
            capacity: 39
        })
    ));
}

/// 解码不会修改输入缓冲区
#[test]
fn test_decode_is_non_destructive() -> anyhow::Result<()> {
    let pixels = random_buffer(16, 16);
    let encoded = encode(&pixels, &text("read only"), n(5))?;
    let snapshot = encoded.clone();

    decode(&encoded, n(5))?;
    decode_with(&encoded, n(5), Termination::BeforeAppend)?;
    decode(&encoded, n(2))?;

    assert_eq!(encoded, snapshot);
    Ok(())
}

/// 编码返回新缓冲区，原缓冲区保持不变
#[test]
fn test_encode_leaves_source_untouched() -> anyhow::Result<()> {
    let pixels = uniform_buffer(30, 0xAA);
    let snapshot = pixels.clone();

    let encoded = encode(&pixels, &text("copy"), n(4))?;
    assert_ne!(encoded, pixels);
    assert_eq!(pixels, snapshot);
    Ok(())
}

/// 未经编码的图像返回 NotFound，而不是错误
#[test]
fn test_plain_image_has_no_message() -> anyhow::Result<()> {
    for value in [0x00, 0xFF, 0x24] {
        let pixels = uniform_buffer(50, value);
        for bits in 1..=7 {
            assert_eq!(decode(&pixels, n(bits))?, Decoded::NotFound);
            assert_eq!(
                decode_with(&pixels, n(bits), Termination::BeforeAppend)?,
                Decoded::NotFound
            );
        }
    }
    Ok(())
}

/// 在同一图像上先后隐藏两条消息，只能恢复第二条
#[test]
fn test_second_encode_overwrites_first() -> anyhow::Result<()> {
    let pixels = random_buffer(32, 32);
    let first = encode(&pixels, &text("the first, much longer message"), n(2))?;
    let second = encode(&first, &text("second"), n(2))?;

    assert_eq!(decode(&second, n(2))?, Decoded::Found(text("second")));
    Ok(())
}

/// 使用与编码时不同的位宽解码得不到原消息，但也不会崩溃
#[test]
fn test_wrong_bit_width_does_not_recover_message() -> anyhow::Result<()> {
    let pixels = uniform_buffer(400, 0x00);
    let message = text("hello");
    let encoded = encode(&pixels, &message, n(3))?;

    for bits in (1..=7).filter(|&bits| bits != 3) {
        let decoded = decode(&encoded, n(bits))?;
        assert_ne!(decoded, Decoded::Found(message.clone()), "n = {bits}");
    }
    Ok(())
}

/// 两种结束判断方式：旧方式会多读一个字符，但恢复的消息相同
#[test]
fn test_termination_modes() -> anyhow::Result<()> {
    let pixels = uniform_buffer(70, 0xFF);
    let encoded = encode(&pixels, &text("hi"), n(3))?;

    let after = scan(&encoded, n(3), Termination::AfterAppend);
    assert_eq!(after.as_bytes(), b"hi$t3g0");

    let before = scan(&encoded, n(3), Termination::BeforeAppend);
    assert_eq!(before.as_bytes(), b"hi$t3g0\xFF");

    assert_eq!(
        decode_with(&encoded, n(3), Termination::AfterAppend)?,
        decode_with(&encoded, n(3), Termination::BeforeAppend)?
    );
    Ok(())
}

/// 消息本身包含结束标记时，只能恢复第一次出现之前的部分
#[test]
fn test_embedded_delimiter_truncates_message() -> anyhow::Result<()> {
    let pixels = random_buffer(20, 20);
    let message = Message::from(b"ab$t3g0cd".as_slice());

    for termination in [Termination::AfterAppend, Termination::BeforeAppend] {
        let encoded = encode(&pixels, &message, n(2))?;
        assert_eq!(
            decode_with(&encoded, n(2), termination)?,
            Decoded::Found(text("ab")),
            "{termination:?}"
        );
    }

    // 旧扫描方式在第一个结束标记后多读一个字符即停止
    let encoded = encode(&pixels, &message, n(2))?;
    let before = scan(&encoded, n(2), Termination::BeforeAppend);
    assert_eq!(before.as_bytes(), b"ab$t3g0c");
    Ok(())
}

/// 扫描到通道耗尽时，末尾不足 8 位的部分仍被解析为一个字符
#[test]
fn test_scan_parses_trailing_partial_group() {
    let pixels = uniform_buffer(1, 0xFF);
    let scanned = scan(&pixels, n(1), Termination::AfterAppend);
    assert_eq!(scanned.as_bytes(), &[0b111u8]);

    let pixels = uniform_buffer(3, 0x01);
    let scanned = scan(&pixels, n(1), Termination::AfterAppend);
    assert_eq!(scanned.as_bytes(), &[0xFFu8, 0b1]);
}

/// 非法位宽与畸形缓冲区在处理前即被拒绝
#[test]
fn test_invalid_input_rejected() {
    assert_eq!(BitWidth::try_from(0), Err(StegoError::InvalidBitWidth(0)));
    assert_eq!(BitWidth::try_from(8), Err(StegoError::InvalidBitWidth(8)));
    assert_eq!(BitWidth::default().get(), 3);

    assert!(matches!(
        PixelBuffer::from_raw(2, 2, vec![0; 11]),
        Err(StegoError::InvalidBuffer {
            expected: 12,
            actual: 11,
            ..
        })
    ));
    assert!(matches!(
        PixelBuffer::from_raw(0, 0, Vec::new()),
        Err(StegoError::InvalidBuffer { .. })
    ));
}

#[test]
fn test_pixel_buffer_from_pixels() -> anyhow::Result<()> {
    let pixels = PixelBuffer::from_pixels(2, 1, &[[1, 2, 3], [4, 5, 6]])?;
    assert_eq!(pixels.pixel_count(), 2);
    assert_eq!(pixels.channels(), &[1u8, 2, 3, 4, 5, 6]);
    assert_eq!(pixels.pixel(1), Some([4, 5, 6]));
    assert_eq!(pixels.pixel(2), None);
    Ok(())
}
