//! PyO3 bindings for the pricewave pipeline.
//!
//! Exposes the Rust implementation to Python:
//! - Feature tables (column dict in, column dict out)
//! - The staged pipeline (OHLC, indicators, denoising)
//! - Raw wavelet decomposition, reconstruction and denoising

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use pricewave_core::{Config as RustConfig, Error as RustError, FeatureTable as RustFeatureTable};
use pricewave_features::AugmentOptions;
use pricewave_ingestion::RawTable;
use pricewave_pipeline::{Denoiser, Pipeline as RustPipeline};
use pricewave_wavelet::Wavelet;

fn to_py_err(err: RustError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn resolve_wavelet(name: &str) -> PyResult<Wavelet> {
    Wavelet::from_name(name).map_err(to_py_err)
}

fn raw_from_dict(columns: &Bound<'_, PyDict>) -> PyResult<RawTable> {
    let mut pairs: Vec<(String, Vec<String>)> = Vec::with_capacity(columns.len());
    for (name, cells) in columns.iter() {
        pairs.push((name.extract()?, cells.extract()?));
    }
    RawTable::from_columns(pairs).map_err(to_py_err)
}

// ============================================================================
// Python-exposed Types
// ============================================================================

/// Ordered numeric columns with an optional date index.
#[pyclass(name = "FeatureTable")]
#[derive(Clone)]
pub struct PyFeatureTable {
    inner: RustFeatureTable,
}

#[pymethods]
impl PyFeatureTable {
    /// Build from a `{name: [float, ...]}` dict, keeping key order.
    #[new]
    fn new(columns: &Bound<'_, PyDict>) -> PyResult<Self> {
        let mut inner = RustFeatureTable::new();
        for (name, values) in columns.iter() {
            let name: String = name.extract()?;
            let values: Vec<f64> = values.extract()?;
            inner.push_column(name, values).map_err(to_py_err)?;
        }
        Ok(PyFeatureTable { inner })
    }

    /// Column names in order.
    fn columns(&self) -> Vec<String> {
        self.inner
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Values of one column.
    fn column(&self, name: &str) -> PyResult<Vec<f64>> {
        self.inner
            .values(name)
            .map(<[f64]>::to_vec)
            .map_err(to_py_err)
    }

    /// ISO dates of the row index, if any.
    fn dates(&self) -> Option<Vec<String>> {
        self.inner
            .dates()
            .map(|d| d.iter().map(|date| date.format("%Y-%m-%d").to_string()).collect())
    }

    /// All columns as an insertion-ordered dict.
    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new_bound(py);
        for column in self.inner.iter() {
            dict.set_item(&column.name, column.values.clone())?;
        }
        Ok(dict)
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "FeatureTable(rows={}, columns={})",
            self.inner.len(),
            self.inner.width()
        )
    }
}

impl From<RustFeatureTable> for PyFeatureTable {
    fn from(inner: RustFeatureTable) -> Self {
        PyFeatureTable { inner }
    }
}

// ============================================================================
// Python-exposed Pipeline
// ============================================================================

/// Staged feature pipeline.
#[pyclass(name = "Pipeline")]
pub struct PyPipeline {
    inner: RustPipeline,
}

#[pymethods]
impl PyPipeline {
    #[new]
    #[pyo3(signature = (wavelet, level, add_correlated=false, correlation_threshold=0.85, denoise=true))]
    fn new(
        wavelet: &str,
        level: u32,
        add_correlated: bool,
        correlation_threshold: f64,
        denoise: bool,
    ) -> PyResult<Self> {
        let mut config = RustConfig::new(wavelet, level);
        config.augment.add_correlated = add_correlated;
        config.augment.correlation_threshold = correlation_threshold;
        config.denoise.enabled = denoise;
        Ok(PyPipeline {
            inner: RustPipeline::new(config).map_err(to_py_err)?,
        })
    }

    /// Create from a YAML or JSON config file.
    #[staticmethod]
    fn from_config_file(path: &str) -> PyResult<Self> {
        let config = RustConfig::from_file(path).map_err(to_py_err)?;
        Ok(PyPipeline {
            inner: RustPipeline::new(config).map_err(to_py_err)?,
        })
    }

    #[getter]
    fn wavelet(&self) -> String {
        self.inner.config().wavelet.clone()
    }

    #[getter]
    fn level(&self) -> u32 {
        self.inner.config().level
    }

    /// Normalize raw string columns and add returns/labels.
    fn create_ohlc_data(&self, raw: &Bound<'_, PyDict>) -> PyResult<PyFeatureTable> {
        let raw = raw_from_dict(raw)?;
        self.inner
            .create_ohlc_data(&raw)
            .map(Into::into)
            .map_err(to_py_err)
    }

    /// Add indicators, optionally overriding the correlation settings.
    #[pyo3(signature = (table, peers=None, add_correlated=None, correlation_threshold=None))]
    fn create_ti_data(
        &self,
        table: &PyFeatureTable,
        peers: Option<PyRef<'_, PyFeatureTable>>,
        add_correlated: Option<bool>,
        correlation_threshold: Option<f64>,
    ) -> PyResult<PyFeatureTable> {
        let config = &self.inner.config().augment;
        let options = AugmentOptions {
            add_correlated: add_correlated.unwrap_or(config.add_correlated),
            correlation_threshold: correlation_threshold.unwrap_or(config.correlation_threshold),
        };
        let peers = peers.as_ref().map(|p| &p.inner);
        self.inner
            .create_ti_data_with(&table.inner, options, peers)
            .map(Into::into)
            .map_err(to_py_err)
    }

    /// Denoise every feature column.
    fn create_dwt_data(&self, table: &PyFeatureTable) -> PyResult<PyFeatureTable> {
        self.inner
            .create_dwt_data(&table.inner)
            .map(Into::into)
            .map_err(to_py_err)
    }

    /// Run every stage on raw string columns.
    #[pyo3(signature = (raw, peers=None))]
    fn run(
        &self,
        raw: &Bound<'_, PyDict>,
        peers: Option<PyRef<'_, PyFeatureTable>>,
    ) -> PyResult<PyFeatureTable> {
        let raw = raw_from_dict(raw)?;
        let peers = peers.as_ref().map(|p| &p.inner);
        self.inner
            .run(&raw, peers)
            .map(Into::into)
            .map_err(to_py_err)
    }
}

// ============================================================================
// Wavelet Functions
// ============================================================================

/// Multilevel decomposition: `[cA_n, cD_n, ..., cD_1]`.
#[pyfunction]
fn wavedec(data: Vec<f64>, wavelet: &str, level: u32) -> PyResult<Vec<Vec<f64>>> {
    pricewave_wavelet::wavedec(&data, &resolve_wavelet(wavelet)?, level).map_err(to_py_err)
}

/// Multilevel reconstruction from `[cA_n, cD_n, ..., cD_1]`.
#[pyfunction]
fn waverec(coeffs: Vec<Vec<f64>>, wavelet: &str) -> PyResult<Vec<f64>> {
    pricewave_wavelet::waverec(&coeffs, &resolve_wavelet(wavelet)?).map_err(to_py_err)
}

/// Universal-threshold soft denoising of one series.
#[pyfunction]
fn denoise(data: Vec<f64>, wavelet: &str, level: u32) -> PyResult<Vec<f64>> {
    Denoiser::new(resolve_wavelet(wavelet)?, level)
        .denoise_values("data", &data)
        .map_err(to_py_err)
}

// ============================================================================
// Module Definition
// ============================================================================

/// Pricewave - wavelet-denoised feature tables from daily prices.
#[pymodule]
fn pricewave(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyFeatureTable>()?;
    m.add_class::<PyPipeline>()?;

    m.add_function(wrap_pyfunction!(wavedec, m)?)?;
    m.add_function(wrap_pyfunction!(waverec, m)?)?;
    m.add_function(wrap_pyfunction!(denoise, m)?)?;

    Ok(())
}
