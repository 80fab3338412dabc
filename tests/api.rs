use byteorder::{ByteOrder, LittleEndian};
use tdms_rs::api::file::TdmsFile;
use tdms_rs::config::{MAX_CHANNELS_PER_GROUP, MAX_GROUPS_PER_FILE, MAX_NAME_LEN};
use tdms_rs::error::TdmsError;
use tdms_rs::segment::Segment;
use tdms_rs::segment::property::PropertyValue;
use tdms_rs::segment::raw_data::ChannelData;
use tdms_rs::types::DataType;
use tdms_rs::writer::TdmsWriter;

#[test]
fn paths_are_canonical() -> Result<(), TdmsError> {
    let mut file = TdmsFile::new();
    let g = file.add_group("Sensor Array")?;
    let c = file.group_mut(g).add_channel("Temp 1", DataType::SingleFloat)?;

    let group = file.group(g);
    assert_eq!(group.name(), "Sensor Array");
    assert_eq!(group.path(), "/'Sensor Array'");

    let channel = group.channel(c);
    assert_eq!(channel.name(), "Temp 1");
    assert_eq!(channel.path(), "/'Sensor Array'/'Temp 1'");
    assert_eq!(channel.data_type(), DataType::SingleFloat);
    Ok(())
}

#[test]
fn group_capacity_is_enforced() -> Result<(), TdmsError> {
    let mut file = TdmsFile::new();
    for i in 0..MAX_GROUPS_PER_FILE {
        file.add_group(&format!("G{i}"))?;
    }
    match file.add_group("overflow") {
        Err(TdmsError::TooManyGroups { max }) => assert_eq!(max, MAX_GROUPS_PER_FILE),
        other => panic!("unexpected {other:?}"),
    }
    // the failed add left the file unchanged
    assert_eq!(file.groups().len(), MAX_GROUPS_PER_FILE);
    Ok(())
}

#[test]
fn channel_capacity_is_enforced() -> Result<(), TdmsError> {
    let mut file = TdmsFile::new();
    let g = file.add_group("G")?;
    for i in 0..MAX_CHANNELS_PER_GROUP {
        file.group_mut(g).add_channel(&format!("C{i}"), DataType::U8)?;
    }
    match file.group_mut(g).add_channel("overflow", DataType::U8) {
        Err(TdmsError::TooManyChannels { max }) => assert_eq!(max, MAX_CHANNELS_PER_GROUP),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(file.group(g).channels().len(), MAX_CHANNELS_PER_GROUP);
    Ok(())
}

#[test]
fn over_long_names_are_rejected() -> Result<(), TdmsError> {
    let mut file = TdmsFile::new();

    let longest = "n".repeat(MAX_NAME_LEN);
    let g = file.add_group(&longest)?;
    assert_eq!(file.group(g).name().len(), MAX_NAME_LEN);

    let too_long = "n".repeat(MAX_NAME_LEN + 1);
    match file.add_group(&too_long) {
        Err(TdmsError::NameTooLong { len, max }) => {
            assert_eq!(len, MAX_NAME_LEN + 1);
            assert_eq!(max, MAX_NAME_LEN);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(file.groups().len(), 1);

    match file.group_mut(g).add_channel(&too_long, DataType::U8) {
        Err(TdmsError::NameTooLong { .. }) => {}
        other => panic!("unexpected {other:?}"),
    }
    Ok(())
}

#[test]
fn unwritable_channel_types_are_rejected() -> Result<(), TdmsError> {
    let mut file = TdmsFile::new();
    let g = file.add_group("G")?;

    for data_type in [
        DataType::ExtendedFloat,
        DataType::SingleFloatWithUnit,
        DataType::FixedPoint,
        DataType::ComplexSingleFloat,
        DataType::ComplexDoubleFloat,
    ] {
        match file.group_mut(g).add_channel("C", data_type) {
            Err(TdmsError::UnsupportedType(t)) => assert_eq!(t, data_type),
            other => panic!("unexpected {other:?}"),
        }
    }

    // String is declarable even though no raw data can be attached
    file.group_mut(g).add_channel("Log", DataType::String)?;
    Ok(())
}

#[test]
fn string_channels_reject_raw_data() -> Result<(), TdmsError> {
    let mut file = TdmsFile::new();
    let g = file.add_group("G")?;
    let c = file.group_mut(g).add_channel("Log", DataType::String)?;

    match file.group(g).channel(c).data_segment(ChannelData::U8(&[1])) {
        Err(TdmsError::UnsupportedType(DataType::String)) => {}
        other => panic!("unexpected {other:?}"),
    }
    Ok(())
}

#[test]
fn mismatched_value_types_are_rejected() -> Result<(), TdmsError> {
    let mut file = TdmsFile::new();
    let g = file.add_group("G")?;
    let c = file.group_mut(g).add_channel("C", DataType::U8)?;

    let group = file.group(g);
    match group.channel(c).data_segment(ChannelData::I8(&[1])) {
        Err(TdmsError::TypeMismatch { expected, actual }) => {
            assert_eq!(expected, DataType::U8);
            assert_eq!(actual, DataType::I8);
        }
        other => panic!("unexpected {other:?}"),
    }
    Ok(())
}

#[test]
fn empty_single_channel_data_is_rejected() -> Result<(), TdmsError> {
    let mut file = TdmsFile::new();
    let g = file.add_group("G")?;
    let c = file.group_mut(g).add_channel("C", DataType::U8)?;

    match file.group(g).channel(c).data_segment(ChannelData::U8(&[])) {
        Err(TdmsError::EmptyData) => {}
        other => panic!("unexpected {other:?}"),
    }
    Ok(())
}

#[test]
fn group_data_requires_one_entry_per_channel() -> Result<(), TdmsError> {
    let mut file = TdmsFile::new();
    let g = file.add_group("G")?;
    file.group_mut(g).add_channel("C1", DataType::U8)?;
    file.group_mut(g).add_channel("C2", DataType::U8)?;

    let group = file.group(g);
    let data = [ChannelData::U8(&[1])];
    match group.data_segment(&data) {
        Err(TdmsError::ChannelCountMismatch { expected, actual }) => {
            assert_eq!(expected, 2);
            assert_eq!(actual, 1);
        }
        other => panic!("unexpected {other:?}"),
    }
    Ok(())
}

fn build_demo_file() -> Result<TdmsFile, TdmsError> {
    let mut file = TdmsFile::new();
    let g1 = file.add_group("Group 1 name")?;
    let g2 = file.add_group("Group 2 name")?;
    file.group_mut(g1).add_channel("Channel 1 name", DataType::U8)?;
    file.group_mut(g1).add_channel("Channel 2 name", DataType::SingleFloat)?;
    file.group_mut(g2).add_channel("Channel 3 name", DataType::TimeStamp)?;
    Ok(file)
}

/// Byte offsets of every `TDSm` lead-in reachable by walking the stream.
fn segment_starts(bytes: &[u8]) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        assert_eq!(&bytes[pos..pos + 4], b"TDSm");
        starts.push(pos);
        let next = LittleEndian::read_u64(&bytes[pos + 12..pos + 20]) as usize;
        pos += 28 + next;
    }
    starts
}

#[test]
fn writer_appends_segments_back_to_back() -> Result<(), TdmsError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("demo.tdms");
    let path = path.to_str().unwrap();

    let file = build_demo_file()?;
    let mut writer = TdmsWriter::create(path)?;

    let mut expected_starts = Vec::new();
    expected_starts.push(writer.write_segment(&file.declaration_segment())?);
    expected_starts.push(writer.write_segment(
        &file.property_segment("Description", PropertyValue::String("Bench recording"))?,
    )?);
    expected_starts.push(
        writer.write_segment(&file.property_segment("Author", PropertyValue::String("X"))?)?,
    );

    let group = &file.groups()[0];
    let data = [
        ChannelData::U8(&[0, 1, 2]),
        ChannelData::SingleFloat(&[10.0, 11.1]),
    ];
    expected_starts.push(writer.write_segment(&group.data_segment(&data)?)?);

    let end = writer.offset();
    writer.finalize()?;

    let bytes = std::fs::read(path)?;
    assert_eq!(bytes.len() as u64, end);
    let starts: Vec<u64> = segment_starts(&bytes).iter().map(|&s| s as u64).collect();
    assert_eq!(starts, expected_starts);
    Ok(())
}

#[test]
fn mmap_writer_produces_identical_bytes() -> Result<(), TdmsError> {
    let dir = tempfile::tempdir()?;
    let buffered_path = dir.path().join("buffered.tdms");
    let mapped_path = dir.path().join("mapped.tdms");

    let file = build_demo_file()?;
    let declaration = file.declaration_segment();
    let property = file.property_segment("Title", PropertyValue::String("demo"))?;
    let total = declaration.byte_len() + property.byte_len();

    let mut buffered = TdmsWriter::create(buffered_path.to_str().unwrap())?;
    buffered.write_segment(&declaration)?;
    buffered.write_segment(&property)?;
    buffered.finalize()?;

    let mut mapped = TdmsWriter::create_mmap(mapped_path.to_str().unwrap(), total)?;
    mapped.write_segment(&declaration)?;
    mapped.write_segment(&property)?;
    assert_eq!(mapped.offset() as usize, total);
    mapped.finalize()?;

    assert_eq!(std::fs::read(buffered_path)?, std::fs::read(mapped_path)?);
    Ok(())
}

#[test]
fn writer_accepts_any_sink() -> Result<(), TdmsError> {
    let file = build_demo_file()?;
    let declaration = file.declaration_segment();

    let mut writer = TdmsWriter::new(Vec::new());
    writer.write_segment(&declaration)?;
    assert_eq!(writer.offset() as usize, declaration.byte_len());
    Ok(())
}
