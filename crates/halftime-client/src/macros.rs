// Expands the given method-set macro with the signature of every operation
// of `Client`.
//
// The blocking facades are generated from this single list, so their method
// names and arguments always match the non-blocking ones.
macro_rules! for_each_operation {
    ($method_set:ident) => {
        $method_set! {
            /// Retrieves a [`Device`](halftime::Device) and all of its firmwares.
            device(identifier: &str) -> halftime::Device;
            /// Retrieves the [`Firmware`](halftime::Firmware) with the given
            /// build for a device.
            firmware(identifier: &str, buildid: &str) -> halftime::Firmware;
            /// Retrieves every [`Firmware`](halftime::Firmware) with the given
            /// version.
            firmwares_by_version(version: &str) -> Vec<halftime::Firmware>;
            /// Retrieves every [`KeySet`](halftime::KeySet) known for a device.
            device_keys(identifier: &str) -> Vec<halftime::KeySet>;
            /// Retrieves the [`KeySet`](halftime::KeySet) of a firmware build
            /// for a device.
            firmware_keys(identifier: &str, buildid: &str) -> halftime::KeySet;
            /// Retrieves the [`OtaFirmware`](halftime::OtaFirmware) with the
            /// given build for a device.
            ota(identifier: &str, buildid: &str) -> halftime::OtaFirmware;
            /// Retrieves every [`OtaFirmware`](halftime::OtaFirmware) with the
            /// given version.
            otas_by_version(version: &str) -> Vec<halftime::OtaFirmware>;
            /// Retrieves the plain-text documentation of an over-the-air
            /// update.
            ota_documentation(identifier: &str, version: &str) -> String;
            /// Lists every product of a software catalog channel.
            catalog_products(channel: halftime::CatalogChannel) -> Vec<halftime::CatalogProduct>;
            /// Lists the software catalog products matching a
            /// [`CatalogQuery`](crate::catalog::CatalogQuery).
            query_catalog(query: &$crate::catalog::CatalogQuery) -> Vec<halftime::CatalogProduct>;
        }
    };
}

// Methods which block the calling thread on the owned scheduler.
macro_rules! blocking_methods {
    ($($(#[$meta:meta])* $name:ident($($arg:ident: $ty:ty),*) -> $output:ty;)*) => {
        $(
            $(#[$meta])*
            ///
            /// Blocks the calling thread until the operation completes.
            ///
            /// # Errors
            ///
            /// The operation fails, or the call is issued from inside an
            /// asynchronous runtime.
            pub fn $name(&self, $($arg: $ty),*) -> $crate::error::Result<$output> {
                self.scheduler.block_on(self.client.$name($($arg),*))
            }
        )*
    };
}

// Methods which choose between deferring and blocking on every call.
macro_rules! dual_methods {
    ($($(#[$meta:meta])* $name:ident($($arg:ident: $ty:ty),*) -> $output:ty;)*) => {
        $(
            $(#[$meta])*
            ///
            /// Inside an asynchronous runtime, it returns a
            /// [`Call::Pending`](crate::dispatch::Call::Pending) future to be
            /// awaited. Otherwise, it blocks the calling thread and returns a
            /// [`Call::Ready`](crate::dispatch::Call::Ready) result.
            pub fn $name(
                &self,
                $($arg: $ty),*
            ) -> $crate::dispatch::Call<
                impl std::future::Future<Output = $crate::error::Result<$output>> + Send,
            > {
                self.dispatch(self.client.$name($($arg),*))
            }
        )*
    };
}

pub(crate) use {blocking_methods, dual_methods, for_each_operation};
