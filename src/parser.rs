use std::convert::TryFrom;

use indexmap::IndexMap;
use itertools::Itertools;
use nom::branch::alt;
use nom::bytes::complete::{escaped_transform, is_not, tag, take};
use nom::character::complete::{char, digit1};
use nom::combinator::{all_consuming, map, map_res, opt, rest, value};
use nom::multi::{many0, separated_list0, separated_list1};
use nom::sequence::{delimited, preceded, separated_pair, terminated, tuple};
use nom::IResult;

use crate::record::{Genotype, RecordBuilder, VariantRecord};
use crate::types::{
    ContigDeclaration, FieldDeclaration, FilterDeclaration, InfoNumber, Sample, HeaderValue,
};

const MISSING: &str = ".";

pub(crate) fn info_number(input: &str) -> IResult<&str, InfoNumber> {
    alt((
        map(map_res(digit1, str::parse), InfoNumber::Count),
        value(InfoNumber::AlternateAlleles, tag("A")),
        value(InfoNumber::Alleles, tag("R")),
        value(InfoNumber::Genotypes, tag("G")),
        value(InfoNumber::Unknown, tag(".")),
    ))(input)
}

fn string(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        map(
            opt(escaped_transform(
                is_not("\\\""),
                '\\',
                alt((value("\\", tag("\\")), value("\"", tag("\"")))),
            )),
            Option::unwrap_or_default,
        ),
        char('"'),
    )(input)
}

fn keys_and_values(input: &str) -> IResult<&str, Vec<(&str, String)>> {
    fn key_value(input: &str) -> IResult<&str, (&str, String)> {
        separated_pair(
            is_not("<,=>"),
            char('='),
            alt((string, map(is_not(",>"), str::to_owned))),
        )(input)
    }
    delimited(char('<'), separated_list0(char(','), key_value), char('>'))(input)
}

fn structured<T>(value: &str) -> Result<T, String>
where
    T: for<'a> TryFrom<Vec<(&'a str, &'a str)>, Error = String>,
{
    let (_, data) = all_consuming(keys_and_values)(value).map_err(|e| e.to_string())?;
    T::try_from(
        data.iter()
            .map(|(k, v)| (*k, v.as_str()))
            .collect_vec(),
    )
}

/// Parses one `##key=value` meta line.
pub(crate) fn header_entry(line: &str) -> Result<(String, HeaderValue), String> {
    let (_, (key, value)) =
        preceded(tag("##"), separated_pair(is_not("="), char('='), rest))(line)
            .map_err(|e: nom::Err<nom::error::Error<&str>>| e.to_string())?;
    let value = match key {
        "INFO" => HeaderValue::Info(structured(value)?),
        "FORMAT" => HeaderValue::Format(structured::<FieldDeclaration>(value)?),
        "FILTER" => HeaderValue::Filter(structured::<FilterDeclaration>(value)?),
        "contig" => HeaderValue::Contig(structured::<ContigDeclaration>(value)?),
        _ => HeaderValue::String(value.to_owned()),
    };
    Ok((key.to_owned(), value))
}

/// Sample names from the `#CHROM` line.
pub(crate) fn column_header(line: &str) -> Result<Vec<Sample>, String> {
    let columns = line.split('\t').collect_vec();
    if columns.len() < 8 || columns[0] != "#CHROM" {
        return Err("malformed #CHROM line".to_owned());
    }
    Ok(columns.iter().skip(9).map(|&s| s.to_owned()).collect())
}

fn field(input: &str) -> IResult<&str, &str> {
    is_not("\t")(input)
}

fn column(input: &str) -> IResult<&str, &str> {
    terminated(field, char('\t'))(input)
}

type FixedColumns<'a> = (&'a str, u64, &'a str, &'a str, &'a str, &'a str, &'a str, &'a str);

fn fixed_columns(input: &str) -> IResult<&str, FixedColumns> {
    tuple((
        column,
        terminated(map_res(digit1, str::parse), char('\t')),
        column,
        column,
        column,
        column,
        column,
        field,
    ))(input)
}

fn info_pairs(input: &str) -> IResult<&str, Vec<(&str, Option<&str>)>> {
    separated_list1(
        char(';'),
        tuple((is_not("=;"), opt(preceded(char('='), is_not(";"))))),
    )(input)
}

fn integers(value: &str) -> Result<Vec<i32>, String> {
    value
        .split(',')
        .map(|v| v.parse().map_err(|_| format!("invalid integer {:?}", v)))
        .collect()
}

fn genotype(sample: &str, keys: &[&str], values: &str) -> Result<Genotype, String> {
    let values = values.split(':').collect_vec();
    let (alleles, phased) = match keys.iter().position(|&k| k == "GT") {
        Some(i) => {
            let gt = values.get(i).copied().unwrap_or(MISSING);
            Genotype::parse_gt(gt).ok_or_else(|| format!("invalid genotype {:?}", gt))?
        }
        None => (Vec::new(), false),
    };
    let mut genotype = Genotype::new(sample, alleles, phased);
    // trailing fields may be dropped
    for (&key, &value) in keys.iter().zip(values.iter()) {
        if key == "GT" || value == MISSING {
            continue;
        }
        genotype = match key {
            "DP" => genotype.with_depth(integers(value)?[0]),
            "GQ" => genotype.with_quality(integers(value)?[0]),
            "AD" => genotype.with_allele_depths(integers(value)?),
            "PL" => genotype.with_likelihoods(integers(value)?),
            "FT" => genotype.with_filters(value),
            _ => genotype.with_attribute(key, value),
        };
    }
    Ok(genotype)
}

/// Parses one VCF data line into a record.
pub(crate) fn record_line(
    line: &str,
    samples: &[Sample],
    source: &str,
) -> Result<VariantRecord, String> {
    let (remaining, (chrom, pos, id, ref_allele, alts, qual, filter, info)) =
        fixed_columns(line).map_err(|e| e.to_string())?;
    let (_, sample_columns) = all_consuming(many0(preceded(char('\t'), field)))(remaining)
        .map_err(|e| e.to_string())?;

    let mut builder = RecordBuilder::new(chrom, pos, ref_allele).source(source);
    if id != MISSING {
        builder = builder.id(id);
    }
    if alts != MISSING {
        builder = builder.alt_alleles(alts.split(',').map(str::to_owned).collect());
    }
    if qual != MISSING {
        builder = builder.qual(
            qual.parse()
                .map_err(|_| format!("invalid QUAL {:?}", qual))?,
        );
    }
    if filter != MISSING {
        builder = builder.filters(filter.split(';').map(str::to_owned).collect());
    }
    if info != MISSING {
        let (_, pairs) = all_consuming(info_pairs)(info).map_err(|e| e.to_string())?;
        let info: IndexMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.unwrap_or("").to_owned()))
            .collect();
        if let Some(end) = info.get("END").and_then(|e| e.parse().ok()) {
            builder = builder.end(end);
        }
        builder = builder.attributes(info);
    }

    if let Some((format, values)) = sample_columns.split_first() {
        if values.len() != samples.len() {
            return Err(format!(
                "expected {} sample columns, found {}",
                samples.len(),
                values.len()
            ));
        }
        let keys = format.split(':').collect_vec();
        let genotypes = samples
            .iter()
            .zip(values)
            .map(|(sample, values)| genotype(sample, &keys, values))
            .collect::<Result<Vec<_>, _>>()?;
        builder = builder.genotypes(genotypes);
    }
    Ok(builder.build())
}

/// `@SQ` line of a sequence dictionary: `(SN, LN)`.
pub(crate) fn sequence_line(line: &str) -> Result<(String, u64), String> {
    let (_, tags) = preceded(
        tag("@SQ\t"),
        separated_list1(char('\t'), separated_pair(take(2usize), char(':'), field)),
    )(line)
    .map_err(|e: nom::Err<nom::error::Error<&str>>| e.to_string())?;
    let name = tags
        .iter()
        .find(|(t, _)| *t == "SN")
        .map(|(_, v)| v.to_string())
        .ok_or("@SQ line without SN")?;
    let length = tags
        .iter()
        .find(|(t, _)| *t == "LN")
        .and_then(|(_, v)| v.parse().ok())
        .ok_or("@SQ line without valid LN")?;
    Ok((name, length))
}

/// Name and length columns of a `.fai` line.
pub(crate) fn fai_line(line: &str) -> Result<(String, u64), String> {
    let (_, (name, length)) = separated_pair(field, char('\t'), map_res(digit1, str::parse))(line)
        .map_err(|e: nom::Err<nom::error::Error<&str>>| e.to_string())?;
    Ok((name.to_owned(), length))
}
