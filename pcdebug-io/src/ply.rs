//! PLY format support

use crate::{PointCloudReader, PointCloudWriter};
use pcdebug_core::{ColoredPoint3f, ColoredPointCloud3f, Error, Point3f, Result, Rgb};
use std::path::Path;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use ply_rs::{
    parser::Parser,
    writer::Writer,
    ply::{Property, PropertyDef, PropertyType, ScalarType, ElementDef, Ply, Addable, DefaultElement, Encoding},
};

/// Color given to points of a file without color properties
pub const DEFAULT_POINT_COLOR: Rgb = [255, 255, 255];

pub struct PlyReader;
pub struct PlyWriter;

impl PointCloudReader for PlyReader {
    fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<ColoredPointCloud3f> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let parser = Parser::<DefaultElement>::new();
        let ply = parser.read_ply(&mut reader)?;

        let mut cloud = ColoredPointCloud3f::new();

        if let Some(vertex_element) = ply.payload.get("vertex") {
            cloud.points.reserve(vertex_element.len());
            for vertex in vertex_element {
                let x = extract_property_value(vertex, "x")?;
                let y = extract_property_value(vertex, "y")?;
                let z = extract_property_value(vertex, "z")?;
                let color = extract_color(vertex).unwrap_or(DEFAULT_POINT_COLOR);

                cloud.push(ColoredPoint3f::new(Point3f::new(x, y, z), color));
            }
        }

        Ok(cloud)
    }
}

impl PointCloudWriter for PlyWriter {
    fn write_point_cloud<P: AsRef<Path>>(cloud: &ColoredPointCloud3f, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        let mut ply = Ply::<DefaultElement>::new();
        ply.header.encoding = Encoding::Ascii;

        let mut vertex_element = ElementDef::new("vertex".to_string());
        vertex_element.count = cloud.len();
        for name in ["x", "y", "z"] {
            vertex_element.properties.add(PropertyDef::new(
                name.to_string(),
                PropertyType::Scalar(ScalarType::Float),
            ));
        }
        for name in ["red", "green", "blue"] {
            vertex_element.properties.add(PropertyDef::new(
                name.to_string(),
                PropertyType::Scalar(ScalarType::UChar),
            ));
        }

        ply.header.elements.add(vertex_element);

        let mut vertices = Vec::with_capacity(cloud.len());
        for point in cloud {
            let mut vertex = DefaultElement::new();
            vertex.insert("x".to_string(), Property::Float(point.position.x));
            vertex.insert("y".to_string(), Property::Float(point.position.y));
            vertex.insert("z".to_string(), Property::Float(point.position.z));
            vertex.insert("red".to_string(), Property::UChar(point.color[0]));
            vertex.insert("green".to_string(), Property::UChar(point.color[1]));
            vertex.insert("blue".to_string(), Property::UChar(point.color[2]));
            vertices.push(vertex);
        }
        ply.payload.insert("vertex".to_string(), vertices);

        let writer_instance = Writer::new();
        writer_instance.write_ply(&mut writer, &mut ply)?;

        Ok(())
    }
}

/// Extract a property value as f32 from a PLY element
fn extract_property_value(element: &DefaultElement, name: &str) -> Result<f32> {
    match element.get(name) {
        Some(Property::Float(val)) => Ok(*val),
        Some(Property::Double(val)) => Ok(*val as f32),
        Some(Property::Int(val)) => Ok(*val as f32),
        Some(Property::UInt(val)) => Ok(*val as f32),
        Some(Property::Short(val)) => Ok(*val as f32),
        Some(Property::UShort(val)) => Ok(*val as f32),
        Some(Property::Char(val)) => Ok(*val as f32),
        Some(Property::UChar(val)) => Ok(*val as f32),
        _ => Err(Error::InvalidData(
            format!("Property '{}' not found or invalid type", name)
        )),
    }
}

/// Per-vertex color, either 8-bit channels or floats in `[0, 1]`
fn extract_color(element: &DefaultElement) -> Option<Rgb> {
    let channel = |name: &str| match element.get(name)? {
        Property::UChar(val) => Some(*val),
        Property::Float(val) => Some((val.clamp(0.0, 1.0) * 255.0).round() as u8),
        Property::Double(val) => Some((val.clamp(0.0, 1.0) * 255.0).round() as u8),
        _ => None,
    };
    Some([channel("red")?, channel("green")?, channel("blue")?])
}
